use serde::{Deserialize, Serialize};

/// Service-layer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Page size when a listing request names none.
    pub default_page_limit: i64,
    /// Prefix of generated invoice codes.
    pub invoice_prefix: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_limit: 10,
            invoice_prefix: "INV".to_string(),
        }
    }
}
