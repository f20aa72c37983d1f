//! Local tool executor - the concrete implementation of [`ToolExecutorPort`].
//!
//! Routes each [`ToolKind`] to its body. Bodies share one `reqwest::Client`.

use super::search;
use async_trait::async_trait;
use authz_application::ToolExecutorPort;
use authz_domain::{ToolArguments, ToolError, ToolKind, ToolOutput};
use std::time::Duration;

/// Default HTTP timeout for tool bodies
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executor that runs tool bodies from this process.
#[derive(Debug, Clone)]
pub struct LocalToolExecutor {
    http_client: reqwest::Client,
    search_endpoint: String,
}

impl LocalToolExecutor {
    /// Executor with the public search endpoint and a 30s timeout
    pub fn new() -> Result<Self, ToolError> {
        Self::with_settings(search::DDG_API_URL, DEFAULT_TIMEOUT)
    }

    pub fn with_settings(search_endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("action-authz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ToolError::execution_failed(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http_client,
            search_endpoint: search_endpoint.into(),
        })
    }

    pub fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }
}

#[async_trait]
impl ToolExecutorPort for LocalToolExecutor {
    async fn execute(&self, kind: ToolKind, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        match kind {
            ToolKind::Search => {
                search::execute_search(&self.http_client, &self.search_endpoint, args).await
            }
        }
    }
}
