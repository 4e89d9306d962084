// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::application::dispatcher::CommandDispatcher;
use crate::application::poller::TelemetryPoller;
use crate::application::preference_service::PreferenceService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::http_client::build_client;
use crate::infrastructure::http_commands::HttpCommandSink;
use crate::infrastructure::http_telemetry::HttpTelemetrySource;
use crate::infrastructure::preference_file::FilePreferenceStore;
use crate::presentation::app_state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create backend adapters (infrastructure layer)
    let client = build_client(config.telemetry.request_timeout())?;
    let source = Arc::new(HttpTelemetrySource::new(
        client.clone(),
        config.telemetry.latest_url.clone(),
        config.telemetry.series_url.clone(),
    ));
    let sink = Arc::new(HttpCommandSink::new(
        client,
        config.control.set_url.clone(),
        config.control.status_url.clone(),
    ));
    let store = Arc::new(FilePreferenceStore::new(&config.preferences.path));

    // Create services (application layer)
    let poller = TelemetryPoller::new(
        source,
        config.telemetry.poll_mode(),
        config.telemetry.refresh_interval(),
        config.dashboard.default_range,
    );
    let dispatcher = CommandDispatcher::new(sink);
    let preferences = PreferenceService::new(store);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poll_task = tokio::spawn(poller.clone().run(shutdown_rx));

    let sync_dispatcher = dispatcher.clone();
    tokio::spawn(async move {
        // Failures are already logged and reflected in the control state.
        let _ = sync_dispatcher.sync_status().await;
    });

    let state = Arc::new(AppState {
        poller,
        dispatcher,
        preferences,
    });
    let router = presentation::router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;
    tracing::info!("Starting agrovision-telemetry on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown requested");
        })
        .await?;

    let _ = shutdown_tx.send(true);
    poll_task.await?;

    Ok(())
}
