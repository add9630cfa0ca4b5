//! Application builder and server runner.

use tokio::net::TcpListener;
use tracing::info;

use relief_core::config::AppConfig;
use relief_core::error::{AppError, ErrorKind};
use relief_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over the given stores.
pub fn build_app(config: AppConfig, stores: Stores) -> Result<axum::Router, AppError> {
    let state = AppState::new(config, stores)?;
    Ok(build_router(state))
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let app = build_app(config, stores)?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;
    info!(address = %addr, "Relief Desk API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
