//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain catalog) from "how to serialize them
//! for the provider API" (infrastructure).

use authz_domain::{ToolCatalog, ToolDefinition};

/// Port for converting tool definitions to provider tool schemas.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert every catalog entry (sorted by name).
    fn all_tools_schema(&self, catalog: &ToolCatalog) -> Vec<serde_json::Value> {
        catalog.all().map(|tool| self.tool_to_schema(tool)).collect()
    }
}
