use std::path::PathBuf;

use config::Config;
use serde::{Deserialize, Serialize};

use crate::membership::DEFAULT_CLIENT_PORT;

/// Collector configuration as an external loader hands it over. Field names
/// match the `[health]` section of the bundled `health.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub endpoints: Vec<String>,
    pub ssl_ca_file: Option<PathBuf>,
    pub ssl_cert_file: Option<PathBuf>,
    pub ssl_key_file: Option<PathBuf>,
    pub cluster: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            endpoints: vec![format!("https://localhost:{}", DEFAULT_CLIENT_PORT)],
            ssl_ca_file: None,
            ssl_cert_file: None,
            ssl_key_file: None,
            cluster: "default".to_string(),
        }
    }
}

impl HealthConfig {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let config = config.get("health")?;
        Ok(config)
    }
}
