//! OpenAI chat completions requester

use super::protocol::{ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope};
use async_trait::async_trait;
use authz_application::{
    CompletionError, CompletionRequest, CompletionRequester, SecretString, ToolChoice,
};
use authz_domain::ToolProposal;
use std::time::Duration;
use tracing::debug;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Requester for `POST <base_url>/v1/chat/completions`.
///
/// Only the first choice is read. Its `tool_calls` become proposals in the
/// order the provider listed them.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionRequester {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    model: String,
    max_tokens: Option<u32>,
}

impl OpenAiCompletionRequester {
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                CompletionError::ConnectionError(format!("HTTP client setup failed: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
            max_tokens: None,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn map_send_error(e: reqwest::Error) -> CompletionError {
    if e.is_timeout() {
        CompletionError::Timeout
    } else {
        CompletionError::ConnectionError(e.to_string())
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect())
}

#[async_trait]
impl CompletionRequester for OpenAiCompletionRequester {
    async fn request(
        &self,
        request: &CompletionRequest,
    ) -> Result<Vec<ToolProposal>, CompletionError> {
        let tool_choice = (!request.tools.is_empty()).then(|| request.tool_choice.as_str());
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            tools: (!request.tools.is_empty()).then_some(request.tools.as_slice()),
            tool_choice,
            max_tokens: self.max_tokens,
        };

        debug!(
            "Requesting completion from {} (model {}, tool_choice {})",
            self.base_url,
            self.model,
            tool_choice.unwrap_or(ToolChoice::Auto.as_str())
        );

        let response = self
            .client
            .post(format!("{}{}", self.base_url, COMPLETIONS_PATH))
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_send_error)?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CompletionError::Unauthorized(error_message(&text)));
        }
        if !status.is_success() {
            return Err(CompletionError::RequestFailed {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::InvalidResponse("response has no choices".into()))?;

        let proposals: Vec<ToolProposal> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                let proposal =
                    ToolProposal::new(call.function.name.clone(), call.function.parsed_arguments());
                match call.id {
                    Some(id) => proposal.with_id(id),
                    None => proposal,
                }
            })
            .collect();

        debug!("Provider proposed {} tool call(s)", proposals.len());
        Ok(proposals)
    }
}
