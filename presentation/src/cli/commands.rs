//! CLI command definitions

use authz_domain::{OutputFormat, SubjectType};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for session outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// One line per proposal
    Text,
    /// JSON document with every proposal and outcome
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// Kind of principal the policy service is asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SubjectTypeArg {
    #[default]
    User,
    Service,
}

impl From<SubjectTypeArg> for SubjectType {
    fn from(arg: SubjectTypeArg) -> Self {
        match arg {
            SubjectTypeArg::User => SubjectType::User,
            SubjectTypeArg::Service => SubjectType::Service,
        }
    }
}

/// CLI arguments for action-authz
#[derive(Parser, Debug)]
#[command(name = "action-authz")]
#[command(author, version, about = "Authorize LLM tool calls against a policy service before running them")]
#[command(long_about = r#"
action-authz sends a prompt to a chat model together with a catalog of tools,
then checks every tool call the model proposes with the policy service before
running it. Calls that are not explicitly allowed are rejected, including when
the policy service is unreachable or slow.

Configuration files are loaded from (in priority order):
1. --config <path>                          Explicit config file
2. ./action-authz.toml                      Project-level config
3. ~/.config/action-authz/config.toml       Global config

Environment variables prefixed with ACTION_AUTHZ_ override file values
(e.g. ACTION_AUTHZ_POLICY__TIMEOUT_SECONDS=5).

Example:
  action-authz --user alice "Search for the capital of France"
  action-authz --user bob -o json --audit-log audit.jsonl "What is Rust?"
"#)]
pub struct Cli {
    /// Prompt sent to the chat model
    pub prompt: Option<String>,

    /// Id of the subject whose permissions are checked
    #[arg(long, value_name = "ID")]
    pub user: Option<String>,

    /// Type of the subject
    #[arg(long, value_enum, default_value = "user")]
    pub subject_type: SubjectTypeArg,

    /// Policy service token
    #[arg(long, env = "PANGEA_AUTHZ_TOKEN", hide_env_values = true)]
    pub authz_token: Option<String>,

    /// Policy service domain (replaces a configured `[policy] base_url`)
    #[arg(long, env = "PANGEA_DOMAIN", value_name = "DOMAIN")]
    pub pangea_domain: Option<String>,

    /// Chat model that proposes tool calls
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Chat completion API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Process proposals concurrently (outcomes keep proposal order)
    #[arg(long)]
    pub concurrent: bool,

    /// Maximum proposals in flight with --concurrent
    #[arg(long, value_name = "N")]
    pub max_concurrency: Option<usize>,

    /// Seconds to wait for each policy decision before rejecting
    #[arg(long, value_name = "SECS")]
    pub policy_timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append one JSON line per decision and outcome to this file
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Exit with status 2 when no proposal was executed
    #[arg(long)]
    pub strict: bool,
}
