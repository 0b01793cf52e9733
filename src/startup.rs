//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server:
//! loading the model from the tracking server, assembling shared state, and
//! serving until interrupted.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ConfigV1;
use crate::metrics::{Metrics, ProcessSampler};
use crate::model::mlflow;
use crate::routes;
use crate::state::AppState;

/// Initializes and runs the application server.
///
/// Loads the model artifact before binding the listener; the service never
/// accepts traffic without a usable model. Serves until SIGINT, then logs a
/// best-effort cleanup line.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, the server fails to bind
/// to the specified address, or a runtime error occurs during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error>> {
    let model = mlflow::load_model(&config.model).await?;
    info!("Model loaded and cached at startup");

    let state = AppState {
        config: config.clone(),
        model: Arc::new(model),
        metrics: Metrics::new(),
        sampler: Arc::new(ProcessSampler::new()),
    };

    info!("Starting server on {}", config.bind_address);

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Application shutdown, resources cleaned");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
