//! Policy Client port
//!
//! Defines the interface to the external authorization decision service.
//! The port reports what the service said; turning that into an allow or
//! deny is the gate's job.

use async_trait::async_trait;
use authz_domain::{AuthorizationQuery, DecisionBasis};
use thiserror::Error;

/// Errors that can occur while asking the policy service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Policy service rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("Malformed policy response: {0}")]
    Protocol(String),

    #[error("Timeout")]
    Timeout,
}

impl PolicyError {
    /// Decision basis the gate records for this failure
    pub fn basis(&self) -> DecisionBasis {
        match self {
            PolicyError::Protocol(_) => DecisionBasis::Protocol,
            PolicyError::Timeout => DecisionBasis::Timeout,
            _ => DecisionBasis::Transport,
        }
    }
}

/// Raw answer from the policy service.
///
/// `allowed` is `None` when the response carried no decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyResponse {
    pub allowed: Option<bool>,
    pub summary: Option<String>,
}

impl PolicyResponse {
    pub fn allow() -> Self {
        Self {
            allowed: Some(true),
            summary: None,
        }
    }

    pub fn deny() -> Self {
        Self {
            allowed: Some(false),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Client for the authorization decision service
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait PolicyClient: Send + Sync {
    /// Ask whether `query.subject` may perform `query.action` on `query.resource`
    async fn check(&self, query: &AuthorizationQuery) -> Result<PolicyResponse, PolicyError>;
}
