use tracing::debug;

use crate::model::features::{Frame, FEATURE_NAMES};
use crate::model::Model;

/// A linear regression model: intercept plus one coefficient per feature
/// column. This is the deserialized form of the elastic-net artifact the
/// training pipeline logs to the tracking server.
#[derive(Debug)]
pub struct Regressor {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl Regressor {
    /// Builds a regressor, checking that the coefficient count matches the
    /// feature schema width.
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self, String> {
        if coefficients.len() != FEATURE_NAMES.len() {
            return Err(format!(
                "model has {} coefficients but the feature schema has {} columns",
                coefficients.len(),
                FEATURE_NAMES.len()
            ));
        }
        Ok(Regressor {
            intercept,
            coefficients,
        })
    }
}

impl Model for Regressor {
    fn predict(&self, frame: &Frame) -> Result<f64, String> {
        let prediction = self.intercept
            + self
                .coefficients
                .iter()
                .zip(frame.values())
                .map(|(c, v)| c * v)
                .sum::<f64>();
        debug!("Computed prediction {}", prediction);
        Ok(prediction)
    }
}
