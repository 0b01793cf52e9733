use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use serde_json::Value;
use vinoserve::config::{Config, ConfigV1};
use vinoserve::metrics::{Metrics, ProcessSampler};
use vinoserve::model::{Model, Regressor, FEATURE_NAMES};
use vinoserve::routes::create_router;
use vinoserve::state::AppState;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
logging:
  level: "warn"
  format: "json"
model:
  tracking_uri: http://localhost:5000
  run_id: test-run
  artifact_path: model/model.json
bind_address: 127.0.0.1:8001
"#;

pub fn load_test_config() -> ConfigV1 {
    let config: Config = Figment::new()
        .merge(Yaml::string(TEST_CONFIG))
        .extract()
        .expect("Failed to parse test config YAML");

    match config {
        Config::ConfigV1(cfg) => cfg,
    }
}

/// A regressor with a known closed form: 1.0 + 0.5 * alcohol.
pub fn test_model() -> Regressor {
    let mut coefficients = vec![0.0; FEATURE_NAMES.len()];
    coefficients[10] = 0.5;
    Regressor::new(1.0, coefficients).expect("test model should build")
}

/// Builds the app in-process. The returned `Metrics` shares the registry
/// with the router, so tests can assert on recorded values directly.
pub fn build_app(model: Arc<dyn Model>) -> (Router, Metrics) {
    let config = Arc::new(load_test_config());
    let metrics = Metrics::new();

    let state = AppState {
        config,
        model,
        metrics: metrics.clone(),
        sampler: Arc::new(ProcessSampler::new()),
    };

    (create_router(state), metrics)
}

pub fn predict_request(data: &Value) -> Request<Body> {
    let body = serde_json::json!({ "data": data }).to_string();
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("failed to build request")
}

pub fn get_request(path: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

/// Reads a single sample value out of the Prometheus text exposition.
pub fn metric_value(text: &str, name: &str) -> f64 {
    let line = text
        .lines()
        .find(|line| {
            let mut parts = line.split_whitespace();
            parts.next() == Some(name)
        })
        .unwrap_or_else(|| panic!("metric {} not found in:\n{}", name, text));
    line.split_whitespace()
        .nth(1)
        .expect("metric line has no value")
        .parse()
        .expect("metric value is not a number")
}
