//! Completion provider configuration from TOML (`[completion]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completions settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCompletionConfig {
    pub model: String,
    /// Base URL for the API (can be overridden for compatible gateways)
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// System message sent before the user prompt
    pub system_prompt: String,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: u64,
}

impl Default for FileCompletionConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            system_prompt: authz_application::use_cases::run_session::DEFAULT_SYSTEM_PROMPT
                .to_string(),
            max_tokens: None,
            timeout_seconds: 60,
        }
    }
}
