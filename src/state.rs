//! Shared application state.
//!
//! Contains the state that is shared across all request handlers,
//! including configuration, the loaded model, and the metrics registry.

use crate::config::ConfigV1;
use crate::metrics::{Metrics, ProcessSampler};
use crate::model::Model;
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request handler. The model handle is established once
/// during startup and never mutated afterwards; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// The loaded regression model, read-only after startup.
    pub model: Arc<dyn Model>,
    /// Prometheus metrics registry and recorders.
    pub metrics: Metrics,
    /// Process CPU/memory sampler used by the per-request layer.
    pub sampler: Arc<ProcessSampler>,
}
