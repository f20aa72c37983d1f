//! Per-proposal outcome

use crate::authz::{DecisionBasis, Subject};
use crate::tool::value_objects::{ToolError, ToolOutput};
use serde::Serialize;

/// Message attached to every rejection
pub const NOT_AUTHORIZED: &str = "not authorized";

/// Result of processing one proposal. Exactly one per proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// Authorized, validated and executed
    Executed { tool: String, output: ToolOutput },
    /// Denied by policy or by a fail-closed failure; body never ran
    Rejected {
        tool: String,
        subject: Subject,
        action: String,
        reason: String,
        basis: DecisionBasis,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// Authorized, but arguments did not fit the schema
    InvalidArguments { tool: String, detail: String },
    /// Name not in the catalog; no policy query was made
    UnknownTool { name: String },
    /// Authorized and validated, but the body failed
    ExecutionFailed { tool: String, error: ToolError },
}

impl ToolOutcome {
    pub fn tool_name(&self) -> &str {
        match self {
            ToolOutcome::Executed { tool, .. }
            | ToolOutcome::Rejected { tool, .. }
            | ToolOutcome::InvalidArguments { tool, .. }
            | ToolOutcome::ExecutionFailed { tool, .. } => tool,
            ToolOutcome::UnknownTool { name } => name,
        }
    }

    /// Short label, matching the serialized `outcome` tag
    pub fn label(&self) -> &'static str {
        match self {
            ToolOutcome::Executed { .. } => "executed",
            ToolOutcome::Rejected { .. } => "rejected",
            ToolOutcome::InvalidArguments { .. } => "invalid_arguments",
            ToolOutcome::UnknownTool { .. } => "unknown_tool",
            ToolOutcome::ExecutionFailed { .. } => "execution_failed",
        }
    }

    pub fn is_executed(&self) -> bool {
        matches!(self, ToolOutcome::Executed { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ToolOutcome::Rejected { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tag_matches_label() {
        let outcome = ToolOutcome::UnknownTool {
            name: "delete_everything".into(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], outcome.label());
        assert_eq!(outcome.tool_name(), "delete_everything");
    }

    #[test]
    fn test_rejected_serialization() {
        let outcome = ToolOutcome::Rejected {
            tool: "search".into(),
            subject: Subject::user("bob").unwrap(),
            action: "read".into(),
            reason: NOT_AUTHORIZED.into(),
            basis: DecisionBasis::ExplicitDeny,
            detail: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["basis"], "explicit_deny");
        assert_eq!(json["subject"]["id"], "bob");
        assert!(json.get("detail").is_none());
        assert!(outcome.is_rejected());
    }
}
