//! Audit and diagnostic log configuration (`[audit]`, `[logging]` sections)

use serde::{Deserialize, Serialize};

/// JSONL audit trail of authorization decisions and outcomes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAuditConfig {
    /// Path of the JSONL file; auditing is off when unset
    pub file: Option<String>,
}

/// `tracing` output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostic logs to this file instead of stderr
    pub file: Option<String>,
}
