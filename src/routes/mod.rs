//! HTTP route definitions and handlers.
//!
//! This module organizes all HTTP endpoints into logical groups:
//! liveness, metrics exposition, and prediction.

mod health_routes;
mod metrics_routes;
mod predict_routes;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::metrics::MetricsRecorder;
use crate::state::AppState;

/// Creates the application router with all configured routes.
///
/// Combines all route modules into a single router, attaches the wide-open
/// CORS policy and the process-sampling layer, and wires in the application
/// state for access in handlers.
pub fn create_router(state: AppState) -> Router {
    // Credentialed CORS cannot use literal wildcards, so origins, methods and
    // headers mirror the request; the effective policy is allow-everything.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .merge(health_routes::routes())
        .merge(metrics_routes::routes())
        .merge(predict_routes::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            sample_process_metrics,
        ))
        .layer(cors)
        .with_state(state)
}

/// Samples process CPU and memory once per request, after the inner handler
/// completes. The two gauges are overwritten on every call; only the most
/// recent sample is observable.
async fn sample_process_metrics(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let (cpu_percent, memory_bytes) = state.sampler.sample();
    state
        .metrics
        .record_process_sample(cpu_percent, memory_bytes as f64);
    response
}
