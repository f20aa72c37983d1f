//! Authorization query built from a subject and a catalog entry

use super::subject::Subject;
use crate::tool::entities::ToolDefinition;
use serde::{Deserialize, Serialize};

/// Resource being acted upon.
///
/// Authorization is catalog-level: the gate fills only `resource_type`.
/// `id` exists for policy services that understand instance identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Resource {
    pub fn of_type(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
        }
    }
}

/// Question sent to the policy service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationQuery {
    pub subject: Subject,
    pub action: String,
    pub resource: Resource,
}

impl AuthorizationQuery {
    /// Build the query for invoking `tool` as `subject`
    pub fn for_tool(subject: &Subject, tool: &ToolDefinition) -> Self {
        Self {
            subject: subject.clone(),
            action: tool.required_action.clone(),
            resource: Resource::of_type(tool.resource_type.clone()),
        }
    }
}

impl std::fmt::Display for AuthorizationQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} on {}",
            self.subject, self.action, self.resource.resource_type
        )
    }
}
