//! Configuration file loading for action-authz
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `ACTION_AUTHZ_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./action-authz.toml` or `./.action-authz.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/action-authz/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    ConfigIssue, FileAuditConfig, FileCompletionConfig, FileConfig, FileDispatchConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FilePolicyConfig, FileSearchConfig,
    Severity,
};
pub use loader::ConfigLoader;
