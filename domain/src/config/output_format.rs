//! Output format value object

use serde::{Deserialize, Serialize};

/// How session outcomes are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable console output (default)
    #[default]
    Text,
    /// One JSON document with every outcome
    Json,
}
