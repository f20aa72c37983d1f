//! Completion Requester port
//!
//! Sends the prompts and tool schemas to an LLM provider and returns the
//! tool calls it proposed, in the order the provider listed them.

use async_trait::async_trait;
use authz_domain::ToolProposal;
use serde_json::Value;
use thiserror::Error;

/// Errors from the completion provider. Any of these aborts the session.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Provider rejected the API key: {0}")]
    Unauthorized(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid completion response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Whether the model may answer without calling a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolChoice {
    Auto,
    /// The model must call at least one tool
    #[default]
    Required,
}

impl ToolChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolChoice::Auto => "auto",
            ToolChoice::Required => "required",
        }
    }
}

/// One completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Tool schemas, as produced by a [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort)
    pub tools: Vec<Value>,
    pub tool_choice: ToolChoice,
}

impl CompletionRequest {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            tools: Vec::new(),
            tool_choice: ToolChoice::default(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = tool_choice;
        self
    }
}

/// Requester for tool-call proposals
#[async_trait]
pub trait CompletionRequester: Send + Sync {
    async fn request(&self, request: &CompletionRequest)
    -> Result<Vec<ToolProposal>, CompletionError>;
}
