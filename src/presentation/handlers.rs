// HTTP request handlers
use crate::application::dispatcher::{BulkOutcome, ToggleOutcome};
use crate::application::error::PreferenceError;
use crate::application::session::{ControlView, DashboardView};
use crate::domain::i18n;
use crate::domain::preferences::{Locale, Preferences, Theme};
use crate::domain::propeller::PropellerId;
use crate::domain::series::TimeRange;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RangeBody {
    pub range: TimeRange,
}

#[derive(Deserialize)]
pub struct PreferencesUpdate {
    pub theme: Option<Theme>,
    pub language: Option<Locale>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let locale = state.preferences.locale();
    Json(DashboardView::build(&state.poller.snapshot(), locale))
}

pub async fn set_range(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RangeBody>,
) -> Json<DashboardView> {
    state.poller.set_range(body.range);
    get_dashboard(State(state)).await
}

pub async fn get_propellers(State(state): State<Arc<AppState>>) -> Json<ControlView> {
    let locale = state.preferences.locale();
    Json(ControlView::build(&state.dispatcher.snapshot(), locale))
}

/// Toggle one propeller. A reverted command is reported as 502 with the outcome body.
pub async fn toggle_propeller(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let prop: PropellerId = match id.parse() {
        Ok(prop) => prop,
        Err(e) => return (StatusCode::NOT_FOUND, e.to_string()).into_response(),
    };

    let outcome = state.dispatcher.toggle(prop).await;
    let status = match outcome {
        ToggleOutcome::Reverted { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(outcome)).into_response()
}

pub async fn toggle_all(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let outcome = state.dispatcher.toggle_all().await;
    let status = match outcome {
        BulkOutcome::Reverted { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Json(outcome))
}

pub async fn get_preferences(State(state): State<Arc<AppState>>) -> Json<Preferences> {
    Json(state.preferences.current())
}

pub async fn put_preferences(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PreferencesUpdate>,
) -> Result<Json<Preferences>, (StatusCode, String)> {
    let service = state.preferences.clone();
    save_preferences(move || service.update(update.theme, update.language)).await
}

pub async fn toggle_theme(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Preferences>, (StatusCode, String)> {
    let service = state.preferences.clone();
    save_preferences(move || service.toggle_theme()).await
}

async fn save_preferences<F>(save: F) -> Result<Json<Preferences>, (StatusCode, String)>
where
    F: FnOnce() -> Result<Preferences, PreferenceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(save).await {
        Ok(Ok(prefs)) => Ok(Json(prefs)),
        Ok(Err(e)) => {
            tracing::error!("Error saving preferences: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
        Err(e) => {
            tracing::error!("Preference task failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// UI string table; unknown locales get English.
pub async fn get_translations(Path(locale): Path<String>) -> Json<BTreeMap<&'static str, &'static str>> {
    Json(i18n::table(Locale::from_stored(&locale)).into_iter().collect())
}
