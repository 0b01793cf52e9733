//! Liveness endpoint.

use crate::state::AppState;
use axum::{
    body::Body,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

/// Registers the liveness route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// Fixed greeting; reachable whenever the process is serving traffic.
async fn home() -> impl IntoResponse {
    Response::new(Body::from("Hello World"))
}
