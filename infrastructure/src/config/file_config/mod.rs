//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod completion;
mod dispatch;
mod logging;
mod output;
mod policy;
mod search;

pub use completion::FileCompletionConfig;
pub use dispatch::FileDispatchConfig;
pub use logging::{FileAuditConfig, FileLoggingConfig};
pub use output::{FileOutputConfig, FileOutputFormat};
pub use policy::FilePolicyConfig;
pub use search::FileSearchConfig;

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How serious a configuration problem is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Startup continues with a fallback
    Warning,
    /// Startup must stop
    Error,
}

/// A single problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted key, e.g. `policy.timeout_seconds`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Policy service (Pangea AuthZ) settings
    pub policy: FilePolicyConfig,
    /// Completion provider (OpenAI) settings
    pub completion: FileCompletionConfig,
    /// Dispatch behavior
    pub dispatch: FileDispatchConfig,
    /// Search tool settings
    pub search: FileSearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Audit trail settings
    pub audit: FileAuditConfig,
    /// Diagnostic log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.policy.domain.trim().is_empty() && self.policy.base_url.is_none() {
            issues.push(ConfigIssue::error(
                "policy.domain",
                "either a domain or a base_url is required",
            ));
        }
        if self.policy.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                "policy.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.completion.model.trim().is_empty() {
            issues.push(ConfigIssue::error("completion.model", "must not be empty"));
        }
        if self.completion.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                "completion.timeout_seconds",
                "must be greater than zero",
            ));
        }
        if self.dispatch.max_concurrency == 0 {
            issues.push(ConfigIssue::warning(
                "dispatch.max_concurrency",
                "0 is treated as 1",
            ));
        }
        if !self.dispatch.concurrent && self.dispatch.max_concurrency != FileDispatchConfig::default().max_concurrency {
            issues.push(ConfigIssue::warning(
                "dispatch.max_concurrency",
                "has no effect unless dispatch.concurrent = true",
            ));
        }
        if self.search.timeout_seconds == 0 {
            issues.push(ConfigIssue::error(
                "search.timeout_seconds",
                "must be greater than zero",
            ));
        }

        issues
    }

    /// Fail on any error-level issue; otherwise return the warnings
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigError> {
        let (errors, warnings): (Vec<_>, Vec<_>) = self
            .validate()
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);
        if errors.is_empty() {
            Ok(warnings)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authz_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[policy]
domain = "gcp.us.pangea.cloud"
timeout_seconds = 3

[completion]
model = "gpt-4o"
system_prompt = "Call exactly one tool."

[dispatch]
concurrent = true
max_concurrency = 8

[output]
format = "json"
color = false

[audit]
file = "/tmp/audit.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.policy.domain, "gcp.us.pangea.cloud");
        assert_eq!(config.policy.timeout_seconds, 3);
        assert_eq!(config.completion.model, "gpt-4o");
        assert_eq!(config.completion.system_prompt, "Call exactly one tool.");
        assert!(config.dispatch.concurrent);
        assert_eq!(config.dispatch.max_concurrency, 8);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert_eq!(config.audit.file.as_deref(), Some("/tmp/audit.jsonl"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[completion]
model = "gpt-4o"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.completion.model, "gpt-4o");
        // Defaults should apply
        assert_eq!(config.policy.domain, "aws.us.pangea.cloud");
        assert_eq!(config.policy.timeout_seconds, 10);
        assert!(!config.dispatch.concurrent);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.policy.timeout_seconds = 0;
        config.completion.model = " ".to_string();
        config.dispatch.max_concurrency = 0;

        let issues = config.validate();
        let fields: Vec<_> = issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"policy.timeout_seconds"));
        assert!(fields.contains(&"completion.model"));
        assert!(fields.contains(&"dispatch.max_concurrency"));
        assert_eq!(
            issues.iter().filter(|i| i.severity == Severity::Error).count(),
            2
        );
    }

    #[test]
    fn test_check_separates_errors_from_warnings() {
        let mut config = FileConfig::default();
        config.dispatch.concurrent = true;
        config.dispatch.max_concurrency = 0;
        let warnings = config.check().unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, Severity::Warning);

        config.search.timeout_seconds = 0;
        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("search.timeout_seconds"));
    }
}
