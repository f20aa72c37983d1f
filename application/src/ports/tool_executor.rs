//! Tool Executor port
//!
//! Runs the body selected by a [`ToolKind`] on arguments that already passed
//! validation. Authorization has happened before this port is reached.

use async_trait::async_trait;
use authz_domain::{ToolArguments, ToolError, ToolKind, ToolOutput};

/// Port for tool execution
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    async fn execute(&self, kind: ToolKind, args: &ToolArguments) -> Result<ToolOutput, ToolError>;
}
