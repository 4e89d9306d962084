// Presentation layer - HTTP surface for the dashboard pages
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_preferences, get_propellers, get_translations, health_check,
    put_preferences, set_range, toggle_all, toggle_propeller, toggle_theme,
};
use axum::routing::{get, post, put};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/range", put(set_range))
        .route("/propellers", get(get_propellers))
        .route("/propellers/toggle-all", post(toggle_all))
        .route("/propellers/:id/toggle", post(toggle_propeller))
        .route("/preferences", get(get_preferences).put(put_preferences))
        .route("/preferences/theme/toggle", post(toggle_theme))
        .route("/i18n/:locale", get(get_translations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
