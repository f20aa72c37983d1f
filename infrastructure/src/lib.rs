//! Infrastructure layer for action-authz
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod completion;
pub mod config;
pub mod logging;
pub mod policy;
pub mod tools;

// Re-export commonly used types
pub use completion::OpenAiCompletionRequester;
pub use config::{
    ConfigError, ConfigIssue, ConfigLoader, FileAuditConfig, FileCompletionConfig, FileConfig,
    FileDispatchConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat, FilePolicyConfig,
    FileSearchConfig, Severity,
};
pub use logging::JsonlAuditLogger;
pub use policy::PangeaPolicyClient;
pub use tools::{JsonSchemaToolConverter, LocalToolExecutor, builtin_catalog};
