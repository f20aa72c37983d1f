//! Dispatch configuration from TOML (`[dispatch]` section)

use authz_application::config::behavior::DEFAULT_MAX_CONCURRENCY;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDispatchConfig {
    /// Authorize and execute proposals concurrently
    pub concurrent: bool,
    /// In-flight limit for concurrent mode
    pub max_concurrency: usize,
}

impl Default for FileDispatchConfig {
    fn default() -> Self {
        Self {
            concurrent: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}
