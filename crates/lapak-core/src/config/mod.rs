pub mod service_config;
pub mod storage_config;

use serde::{Deserialize, Serialize};

pub use service_config::ServiceConfig;
pub use storage_config::StorageConfig;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LapakConfig {
    pub storage: StorageConfig,
    pub service: ServiceConfig,
}

impl LapakConfig {
    /// Load config from a TOML string, falling back to defaults for missing
    /// fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
