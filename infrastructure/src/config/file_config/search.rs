//! Search tool configuration from TOML (`[search]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    /// Instant answer API endpoint
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            base_url: crate::tools::search::DDG_API_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}
