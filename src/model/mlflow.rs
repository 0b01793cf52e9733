use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::ModelConfig;
use crate::model::features::FEATURE_NAMES;
use crate::model::regressor::Regressor;

/// The JSON document the training pipeline logs as the model artifact.
#[derive(Deserialize, Debug)]
struct ModelArtifact {
    #[serde(default)]
    flavor: Option<String>,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    intercept: f64,
    coefficients: Vec<f64>,
}

/// Fetches the model artifact from the tracking server and deserializes it
/// into a ready-to-serve regressor.
///
/// Called exactly once during startup; any error here is fatal for the
/// process.
pub async fn load_model(config: &ModelConfig) -> Result<Regressor, String> {
    let client = reqwest::Client::new();
    let url = format!(
        "{}/get-artifact?path={}&run_id={}",
        config.tracking_uri, config.artifact_path, config.run_id
    );

    debug!("Fetching model artifact from: {}", url);
    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => return Err(format!("Error sending request: {}", e)),
    };

    if !response.status().is_success() {
        return Err(format!(
            "Tracking server returned status {} for run '{}'",
            response.status(),
            config.run_id
        ));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Error reading response body: {}", e))?;
    let artifact: ModelArtifact =
        serde_json::from_str(&body).map_err(|e| format!("Error parsing model artifact: {}", e))?;

    if let Some(names) = &artifact.feature_names {
        if !names.iter().map(String::as_str).eq(FEATURE_NAMES) {
            warn!(
                "Artifact feature names {:?} differ from the built-in schema; \
                 values are still mapped positionally",
                names
            );
        }
    }

    let model = Regressor::new(artifact.intercept, artifact.coefficients)?;
    info!(
        "Loaded model run '{}' (flavor: {})",
        config.run_id,
        artifact.flavor.as_deref().unwrap_or("unknown")
    );
    Ok(model)
}
