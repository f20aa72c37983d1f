//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the OpenAI
//! function-tool format:
//!
//! ```json
//! {"type": "function", "function": {"name": ..., "description": ..., "parameters": {...}}}
//! ```

use authz_application::ToolSchemaPort;
use authz_domain::ToolDefinition;
use serde_json::{Map, Value, json};

/// Converts catalog entries into function-tool schemas.
///
/// `parameters` is a JSON Schema object whose `required` list is derived from
/// the parameter flags, so it always names declared properties.
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            properties.insert(
                param.name.clone(),
                json!({
                    "type": param.param_type.as_str(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "function",
            "function": {
                "name": tool.name,
                "description": tool.description,
                "parameters": {
                    "type": "object",
                    "properties": properties,
                    "required": required,
                }
            }
        })
    }
}
