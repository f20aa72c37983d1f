//! Fail-closed interpretation of policy answers

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What the verdict was based on.
///
/// Only [`DecisionBasis::ExplicitAllow`] permits execution. The remaining
/// variants all deny, but stay distinct so operators can tell a policy
/// decision apart from an infrastructure failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionBasis {
    /// Policy service returned `allowed = true`
    ExplicitAllow,
    /// Policy service returned `allowed = false`
    ExplicitDeny,
    /// Response carried no decision
    MissingDecision,
    /// Policy service unreachable or returned an HTTP error
    Transport,
    /// Response could not be understood
    Protocol,
    /// Policy service did not answer within the configured bound
    Timeout,
}

impl DecisionBasis {
    pub fn as_str(&self) -> &str {
        match self {
            DecisionBasis::ExplicitAllow => "explicit_allow",
            DecisionBasis::ExplicitDeny => "explicit_deny",
            DecisionBasis::MissingDecision => "missing_decision",
            DecisionBasis::Transport => "transport",
            DecisionBasis::Protocol => "protocol",
            DecisionBasis::Timeout => "timeout",
        }
    }

    /// Whether the denial came from a failure rather than a policy decision
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            DecisionBasis::Transport | DecisionBasis::Protocol | DecisionBasis::Timeout
        )
    }
}

impl std::fmt::Display for DecisionBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Allow/deny verdict for one authorization query.
///
/// Fields are private: `allowed` is derived from the basis at construction
/// and cannot be flipped afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationVerdict {
    allowed: bool,
    basis: DecisionBasis,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl AuthorizationVerdict {
    fn new(basis: DecisionBasis, reason: Option<String>) -> Self {
        Self {
            allowed: basis == DecisionBasis::ExplicitAllow,
            basis,
            reason,
        }
    }

    /// Interpret the decision field of a policy response.
    ///
    /// `Some(true)` is the only input that allows.
    pub fn from_decision(decision: Option<bool>, reason: Option<String>) -> Self {
        let basis = match decision {
            Some(true) => DecisionBasis::ExplicitAllow,
            Some(false) => DecisionBasis::ExplicitDeny,
            None => DecisionBasis::MissingDecision,
        };
        Self::new(basis, reason)
    }

    pub fn transport_failure(detail: impl Into<String>) -> Self {
        Self::new(DecisionBasis::Transport, Some(detail.into()))
    }

    pub fn protocol_failure(detail: impl Into<String>) -> Self {
        Self::new(DecisionBasis::Protocol, Some(detail.into()))
    }

    pub fn timed_out(after: Duration) -> Self {
        Self::new(
            DecisionBasis::Timeout,
            Some(format!(
                "policy check timed out after {}ms",
                after.as_millis()
            )),
        )
    }

    pub fn allowed(&self) -> bool {
        self.allowed
    }

    pub fn basis(&self) -> DecisionBasis {
        self.basis
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
