//! Prediction endpoint handler.

use std::time::Instant;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::metrics::MetricsRecorder;
use crate::model::{features, Frame, INSTRUMENTED_FEATURES};
use crate::state::AppState;
use crate::utils::http_helpers::HTTPError;

/// Registers the prediction route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/predict", post(predict))
}

/// The request body: an ordered sequence of feature values. Elements are
/// mapped to columns positionally and are not validated up front.
#[derive(Deserialize)]
pub struct PredictionInput {
    pub data: Vec<Value>,
}

#[derive(Serialize)]
pub struct PredictionOutput {
    pub prediction: f64,
}

/// Runs one prediction.
///
/// The request counter is bumped on entry and the latency histogram receives
/// exactly one observation per call, whatever the outcome.
async fn predict(
    State(state): State<AppState>,
    Json(input): Json<PredictionInput>,
) -> Result<Json<PredictionOutput>, HTTPError> {
    state.metrics.record_request();
    let started = Instant::now();

    let result = run_prediction(&state, &input.data);
    if result.is_err() {
        state.metrics.record_failure();
    }
    state.metrics.record_latency(started.elapsed().as_secs_f64());

    match result {
        Ok(prediction) => Ok(Json(PredictionOutput { prediction })),
        Err(e) => {
            error!("Prediction failed: {}", e);
            Err(HTTPError::internal(format!("Prediction failed: {}", e)))
        }
    }
}

/// Feature instrumentation, frame construction and inference. An error at
/// any step leaves the model untouched and affects only this request.
fn run_prediction(state: &AppState, data: &[Value]) -> Result<f64, String> {
    for (position, feature) in INSTRUMENTED_FEATURES {
        let value = features::numeric_at(data, position)?;
        state.metrics.observe_feature(feature, value);
    }

    let frame = Frame::single_row(data)?;
    let prediction = state.model.predict(&frame)?;

    state.metrics.record_prediction(prediction);
    state.metrics.record_success();
    Ok(prediction)
}
