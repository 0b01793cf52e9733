//! Metrics recording implementation using Prometheus.

use prometheus::{
    register_gauge_with_registry, register_histogram_with_registry,
    register_int_counter_with_registry, Encoder, Gauge, Histogram, IntCounter, Registry,
    TextEncoder,
};
use std::sync::Arc;

use crate::model::INSTRUMENTED_FEATURES;

/// Trait for recording application metrics.
pub trait MetricsRecorder: Clone + Send + Sync + 'static {
    /// Records an incoming prediction request.
    fn record_request(&self);

    /// Records a completed, successful prediction.
    fn record_success(&self);

    /// Records a failed prediction.
    fn record_failure(&self);

    /// Records the wall-clock duration of a prediction request.
    fn record_latency(&self, duration_secs: f64);

    /// Records an input value into the named feature's histogram.
    fn observe_feature(&self, feature: &str, value: f64);

    /// Records a prediction value into the gauge and distribution histogram.
    fn record_prediction(&self, value: f64);

    /// Records one process-level CPU/memory sample.
    fn record_process_sample(&self, cpu_percent: f64, memory_bytes: f64);
}

/// Prometheus metrics collector.
#[derive(Clone)]
pub struct Metrics {
    registry: Arc<Registry>,

    // Request counters
    total_requests: IntCounter,
    successful_predictions: IntCounter,
    failed_predictions: IntCounter,

    // Prediction metrics
    model_prediction: Gauge,
    prediction_values: Histogram,
    request_latency_seconds: Histogram,

    // Input feature distributions, in instrumentation order
    feature_histograms: Vec<(&'static str, Histogram)>,

    // Process-level gauges
    cpu_usage_percent: Gauge,
    memory_usage_bytes: Gauge,
}

/// Observation buckets for the instrumented input features.
fn feature_buckets(feature: &str) -> Vec<f64> {
    match feature {
        "fixed_acidity" => vec![5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0],
        "volatile_acidity" => vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
        _ => prometheus::DEFAULT_BUCKETS.to_vec(),
    }
}

impl Metrics {
    /// Creates a new metrics instance with a Prometheus registry.
    pub fn new() -> Self {
        let registry = Arc::new(Registry::new());

        let total_requests = register_int_counter_with_registry!(
            "total_requests",
            "Total number of prediction requests",
            registry.clone()
        )
        .expect("Failed to register total_requests");

        let successful_predictions = register_int_counter_with_registry!(
            "successful_predictions",
            "Total number of successful predictions",
            registry.clone()
        )
        .expect("Failed to register successful_predictions");

        let failed_predictions = register_int_counter_with_registry!(
            "failed_predictions",
            "Total number of failed predictions",
            registry.clone()
        )
        .expect("Failed to register failed_predictions");

        let model_prediction = register_gauge_with_registry!(
            "model_prediction",
            "Model prediction value",
            registry.clone()
        )
        .expect("Failed to register model_prediction");

        let prediction_values = register_histogram_with_registry!(
            "prediction_values",
            "Distribution of prediction values",
            registry.clone()
        )
        .expect("Failed to register prediction_values");

        let request_latency_seconds = register_histogram_with_registry!(
            "request_latency_seconds",
            "Request latency in seconds",
            vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0],
            registry.clone()
        )
        .expect("Failed to register request_latency_seconds");

        let feature_histograms = INSTRUMENTED_FEATURES
            .iter()
            .map(|&(_, feature)| {
                let histogram = register_histogram_with_registry!(
                    format!("input_{}", feature),
                    format!("{} of input data", feature.replace('_', " ")),
                    feature_buckets(feature),
                    registry.clone()
                )
                .unwrap_or_else(|_| panic!("Failed to register input_{}", feature));
                (feature, histogram)
            })
            .collect();

        let cpu_usage_percent = register_gauge_with_registry!(
            "cpu_usage_percent",
            "CPU usage percentage",
            registry.clone()
        )
        .expect("Failed to register cpu_usage_percent");

        let memory_usage_bytes = register_gauge_with_registry!(
            "memory_usage_bytes",
            "Memory usage in bytes",
            registry.clone()
        )
        .expect("Failed to register memory_usage_bytes");

        Metrics {
            registry,
            total_requests,
            successful_predictions,
            failed_predictions,
            model_prediction,
            prediction_values,
            request_latency_seconds,
            feature_histograms,
            cpu_usage_percent,
            memory_usage_bytes,
        }
    }

    /// Renders all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .expect("Failed to encode metrics");
        String::from_utf8(buffer).expect("Metrics encoding produced invalid UTF-8")
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Metrics::new()
    }
}

impl MetricsRecorder for Metrics {
    fn record_request(&self) {
        self.total_requests.inc();
    }

    fn record_success(&self) {
        self.successful_predictions.inc();
    }

    fn record_failure(&self) {
        self.failed_predictions.inc();
    }

    fn record_latency(&self, duration_secs: f64) {
        self.request_latency_seconds.observe(duration_secs);
    }

    fn observe_feature(&self, feature: &str, value: f64) {
        if let Some((_, histogram)) = self.feature_histograms.iter().find(|(f, _)| *f == feature) {
            histogram.observe(value);
        }
    }

    fn record_prediction(&self, value: f64) {
        self.model_prediction.set(value);
        self.prediction_values.observe(value);
    }

    fn record_process_sample(&self, cpu_percent: f64, memory_bytes: f64) {
        self.cpu_usage_percent.set(cpu_percent);
        self.memory_usage_bytes.set(memory_bytes);
    }
}
