use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: where to fetch the model from, where to bind,
/// and how to log.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the model artifact lives on the tracking server.
///
/// The defaults point at the registry entry this service was built for, so a
/// config file only needs to override them for local experiments.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ModelConfig {
    /// Base URL of the tracking server.
    #[serde(default = "default_tracking_uri")]
    pub tracking_uri: String,
    /// Run id of the logged model to serve.
    #[serde(default = "default_run_id")]
    pub run_id: String,
    /// Artifact path of the model document within the run.
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            tracking_uri: default_tracking_uri(),
            run_id: default_run_id(),
            artifact_path: default_artifact_path(),
        }
    }
}

fn default_tracking_uri() -> String {
    "http://mlflow_server:5000".to_string()
}

fn default_run_id() -> String {
    "81016038b59b4414921424a53061c62c".to_string()
}

fn default_artifact_path() -> String {
    "model/model.json".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:8000".to_string()
}

/// Load config from a YAML file named "config.yaml" in the current directory,
/// with `VINOSERVE_`-prefixed environment variables taking precedence.
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("VINOSERVE_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}
