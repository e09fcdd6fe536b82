use serde::{Deserialize, Serialize};

/// SQLite engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path; tests use the in-memory engine instead.
    pub db_path: String,
    /// SQLITE_BUSY wait before a write fails.
    pub busy_timeout_ms: u32,
    /// WAL journaling; leave on outside of unusual deployments.
    pub wal: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "lapak.db".to_string(),
            busy_timeout_ms: 5000,
            wal: true,
        }
    }
}
