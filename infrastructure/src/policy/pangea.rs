//! Pangea AuthZ client

use super::protocol::{CheckRequest, CheckResult, PangeaResponse, STATUS_SUCCESS};
use async_trait::async_trait;
use authz_application::{PolicyClient, PolicyError, PolicyResponse, SecretString};
use authz_domain::AuthorizationQuery;
use std::time::Duration;
use tracing::debug;

const CHECK_PATH: &str = "/v1/check";

/// HTTP client for `POST <base_url>/v1/check`.
///
/// Reports what the service said. A missing `result.allowed`, or a non-success
/// envelope status, is returned as an absent decision for the gate to deny.
#[derive(Debug, Clone)]
pub struct PangeaPolicyClient {
    client: reqwest::Client,
    base_url: String,
    token: SecretString,
}

impl PangeaPolicyClient {
    /// Client for `https://authz.<domain>`
    pub fn for_domain(domain: &str, token: SecretString) -> Result<Self, PolicyError> {
        Self::new(format!("https://authz.{}", domain), token, None)
    }

    /// `timeout` bounds the HTTP exchange; the gate applies its own bound on top.
    pub fn new(
        base_url: impl Into<String>,
        token: SecretString,
        timeout: Option<Duration>,
    ) -> Result<Self, PolicyError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            "action-authz/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| PolicyError::ConnectionError(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn map_send_error(e: reqwest::Error) -> PolicyError {
    if e.is_timeout() {
        PolicyError::Timeout
    } else {
        PolicyError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl PolicyClient for PangeaPolicyClient {
    async fn check(&self, query: &AuthorizationQuery) -> Result<PolicyResponse, PolicyError> {
        let url = format!("{}{}", self.base_url, CHECK_PATH);
        let body = CheckRequest {
            subject: &query.subject,
            action: &query.action,
            resource: &query.resource,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose())
            .json(&body)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_send_error)?;

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(PolicyError::Unauthorized(summary_of(&text)));
        }
        if !status.is_success() {
            return Err(PolicyError::RequestFailed {
                status: status.as_u16(),
                message: summary_of(&text),
            });
        }

        let envelope: PangeaResponse<CheckResult> = serde_json::from_str(&text)
            .map_err(|e| PolicyError::Protocol(format!("unexpected response body: {}", e)))?;

        debug!(
            "AuthZ check {} returned status {} (request {})",
            query,
            envelope.status,
            envelope.request_id.as_deref().unwrap_or("-")
        );

        let allowed = if envelope.status == STATUS_SUCCESS {
            envelope.result.and_then(|r| r.allowed)
        } else {
            None
        };

        Ok(PolicyResponse {
            allowed,
            summary: envelope.summary,
        })
    }
}

/// Best-effort `summary` from an error body, falling back to the raw text
fn summary_of(body: &str) -> String {
    serde_json::from_str::<PangeaResponse<serde_json::Value>>(body)
        .ok()
        .and_then(|r| r.summary)
        .unwrap_or_else(|| body.chars().take(200).collect())
}
