mod common;

use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{build_app, get_request, metric_value, predict_request, test_model};

/// The worked example row from the wine-quality dataset.
fn example_row() -> Value {
    json!([7.4, 0.70, 0.00, 1.9, 0.076, 11, 34, 0.9978, 3.51, 0.56, 9.4])
}

#[tokio::test]
async fn valid_input_returns_prediction_and_counts() {
    let (app, metrics) = build_app(Arc::new(test_model()));

    let response = app
        .oneshot(predict_request(&example_row()))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let parsed: Value = serde_json::from_slice(&body).expect("body should be JSON");
    let prediction = parsed["prediction"].as_f64().expect("prediction missing");
    // test model: 1.0 + 0.5 * alcohol
    assert!((prediction - (1.0 + 0.5 * 9.4)).abs() < 1e-9);

    let text = metrics.render();
    assert_eq!(metric_value(&text, "total_requests"), 1.0);
    assert_eq!(metric_value(&text, "successful_predictions"), 1.0);
    assert_eq!(metric_value(&text, "failed_predictions"), 0.0);
    assert_eq!(metric_value(&text, "request_latency_seconds_count"), 1.0);

    // Feature histograms each saw exactly the positional input value.
    assert_eq!(metric_value(&text, "input_fixed_acidity_count"), 1.0);
    assert_eq!(metric_value(&text, "input_fixed_acidity_sum"), 7.4);
    assert_eq!(metric_value(&text, "input_volatile_acidity_count"), 1.0);
    assert_eq!(metric_value(&text, "input_volatile_acidity_sum"), 0.7);

    // Prediction gauge and distribution were updated.
    assert!((metric_value(&text, "model_prediction") - prediction).abs() < 1e-9);
    assert_eq!(metric_value(&text, "prediction_values_count"), 1.0);
}

#[tokio::test]
async fn short_input_is_a_server_error() {
    let (app, metrics) = build_app(Arc::new(test_model()));

    let response = app
        .oneshot(predict_request(&json!([1, 2, 3])))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = metrics.render();
    // The request counter is bumped before any validation.
    assert_eq!(metric_value(&text, "total_requests"), 1.0);
    assert_eq!(metric_value(&text, "failed_predictions"), 1.0);
    assert_eq!(metric_value(&text, "successful_predictions"), 0.0);
    // Latency is observed on the failure path too.
    assert_eq!(metric_value(&text, "request_latency_seconds_count"), 1.0);
}

#[tokio::test]
async fn non_numeric_input_is_a_server_error() {
    let (app, metrics) = build_app(Arc::new(test_model()));

    let mut row: Vec<Value> = vec![json!(1.0); 11];
    row[7] = json!("dense");

    let response = app
        .oneshot(predict_request(&json!(row)))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let text = metrics.render();
    assert_eq!(metric_value(&text, "failed_predictions"), 1.0);
    // The instrumented features at positions 0 and 1 were numeric, so their
    // histograms were already updated before the frame build failed.
    assert_eq!(metric_value(&text, "input_fixed_acidity_count"), 1.0);
}

#[tokio::test]
async fn greeting_is_served() {
    let (app, _metrics) = build_app(Arc::new(test_model()));

    let response = app
        .oneshot(get_request("/"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Hello World");
}

#[tokio::test]
async fn metrics_are_listed_zero_valued_before_traffic() {
    let (app, _metrics) = build_app(Arc::new(test_model()));

    let response = app
        .oneshot(get_request("/metrics"))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).expect("exposition should be UTF-8");

    for name in [
        "total_requests",
        "successful_predictions",
        "failed_predictions",
        "model_prediction",
        "prediction_values_count",
        "request_latency_seconds_count",
        "input_fixed_acidity_count",
        "input_volatile_acidity_count",
        "cpu_usage_percent",
        "memory_usage_bytes",
    ] {
        assert_eq!(metric_value(&text, name), 0.0, "metric {}", name);
    }
}

#[tokio::test]
async fn process_gauges_are_set_after_a_request() {
    let (app, metrics) = build_app(Arc::new(test_model()));

    app.oneshot(get_request("/"))
        .await
        .expect("request should complete");

    let text = metrics.render();
    assert!(metric_value(&text, "memory_usage_bytes") > 0.0);
}

#[tokio::test]
async fn concurrent_predictions_settle_at_n() {
    const N: usize = 16;
    let (app, metrics) = build_app(Arc::new(test_model()));

    let mut tasks = Vec::with_capacity(N);
    for _ in 0..N {
        let app = app.clone();
        tasks.push(tokio::spawn(async move {
            let response = app
                .oneshot(predict_request(&example_row()))
                .await
                .expect("request should complete");
            assert_eq!(response.status(), StatusCode::OK);
        }));
    }
    for task in tasks {
        task.await.expect("task should not panic");
    }

    let text = metrics.render();
    assert_eq!(metric_value(&text, "total_requests"), N as f64);
    assert_eq!(metric_value(&text, "successful_predictions"), N as f64);
    assert_eq!(metric_value(&text, "failed_predictions"), 0.0);
    assert_eq!(
        metric_value(&text, "request_latency_seconds_count"),
        N as f64
    );
}
