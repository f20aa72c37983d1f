//! Authorization Gate use case
//!
//! Resolves a proposal against the catalog, builds the authorization query
//! and turns the policy service's answer into a verdict. Fail-closed: every
//! answer other than an explicit allow denies.

use crate::config::SessionContext;
use crate::config::behavior::DEFAULT_POLICY_TIMEOUT;
use crate::ports::policy_client::PolicyClient;
use authz_domain::{
    AuthorizationQuery, AuthorizationVerdict, DecisionBasis, ToolDefinition, ToolProposal,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Proposal named a tool that is not in the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown tool: {0}")]
pub struct UnknownToolError(pub String);

/// Gate between proposals and execution
pub struct AuthorizationGate<P: PolicyClient + 'static> {
    policy: Arc<P>,
    timeout: Duration,
}

impl<P: PolicyClient + 'static> AuthorizationGate<P> {
    pub fn new(policy: Arc<P>) -> Self {
        Self {
            policy,
            timeout: DEFAULT_POLICY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Authorize one proposal.
    ///
    /// Unknown tools return an error without querying the policy service.
    /// Otherwise exactly one policy query is made and the resolved definition
    /// is returned with the verdict.
    pub async fn authorize<'c>(
        &self,
        proposal: &ToolProposal,
        ctx: &'c SessionContext,
    ) -> Result<(&'c ToolDefinition, AuthorizationVerdict), UnknownToolError> {
        let Some(tool) = ctx.catalog().lookup(&proposal.tool_name) else {
            debug!("Proposal names unknown tool '{}'", proposal.tool_name);
            return Err(UnknownToolError(proposal.tool_name.clone()));
        };

        let query = AuthorizationQuery::for_tool(ctx.subject(), tool);
        let verdict = self.check(&query).await;
        Ok((tool, verdict))
    }

    /// Run one bounded policy query and interpret the answer. Never retries.
    pub async fn check(&self, query: &AuthorizationQuery) -> AuthorizationVerdict {
        debug!("Checking authorization: {}", query);

        let verdict = match tokio::time::timeout(self.timeout, self.policy.check(query)).await {
            Err(_) => AuthorizationVerdict::timed_out(self.timeout),
            Ok(Err(e)) => match e.basis() {
                DecisionBasis::Timeout => AuthorizationVerdict::timed_out(self.timeout),
                DecisionBasis::Protocol => AuthorizationVerdict::protocol_failure(e.to_string()),
                _ => AuthorizationVerdict::transport_failure(e.to_string()),
            },
            Ok(Ok(response)) => {
                AuthorizationVerdict::from_decision(response.allowed, response.summary)
            }
        };

        match verdict.basis() {
            basis if basis.is_failure() => warn!(
                "Policy check for {} failed ({}), denying: {}",
                query,
                basis,
                verdict.reason().unwrap_or("no detail")
            ),
            DecisionBasis::MissingDecision => warn!(
                "Policy response for {} carried no decision, denying",
                query
            ),
            basis => debug!("Policy verdict for {}: {}", query, basis),
        }

        verdict
    }
}
