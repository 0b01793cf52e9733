//! Model loading and inference.
//!
//! The model handle is created once in startup, wrapped in an `Arc`, and
//! shared read-only with every request handler.

pub mod features;
pub mod mlflow;
pub mod regressor;

pub use features::{Frame, FEATURE_NAMES, INSTRUMENTED_FEATURES};
pub use regressor::Regressor;

/// A loaded predictive model.
///
/// Implementations must be safe to call concurrently; prediction never
/// mutates the model.
pub trait Model: Send + Sync + 'static {
    /// Computes the scalar prediction for a single-row frame.
    fn predict(&self, frame: &Frame) -> Result<f64, String>;
}
