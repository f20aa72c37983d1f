//! Tool domain traits
//!
//! Contains pure domain logic traits for argument validation.
//! The async ToolExecutorPort is defined in the application layer (ports).

use super::arguments::{ArgumentError, ToolArguments, json_type_name};
use super::entities::ToolDefinition;
use serde_json::Value;

/// Validator for proposed arguments
///
/// This is a pure domain trait that checks a raw argument payload against
/// a tool definition without any I/O operations.
pub trait ArgumentValidator: Send + Sync {
    fn validate(
        &self,
        raw: &Value,
        definition: &ToolDefinition,
    ) -> Result<ToolArguments, ArgumentError>;
}

/// Validates against the definition's parameter list
#[derive(Debug, Clone, Default)]
pub struct SchemaArgumentValidator;

impl ArgumentValidator for SchemaArgumentValidator {
    fn validate(
        &self,
        raw: &Value,
        definition: &ToolDefinition,
    ) -> Result<ToolArguments, ArgumentError> {
        let Value::Object(map) = raw else {
            return Err(ArgumentError::NotAnObject {
                tool: definition.name.clone(),
                found: json_type_name(raw).to_string(),
            });
        };

        // Null counts as absent for required parameters
        for param in definition.parameters.iter().filter(|p| p.required) {
            if map.get(&param.name).is_none_or(Value::is_null) {
                return Err(ArgumentError::MissingRequired {
                    tool: definition.name.clone(),
                    param: param.name.clone(),
                });
            }
        }

        for (name, value) in map {
            let Some(param) = definition.parameter(name) else {
                return Err(ArgumentError::UnknownParameter {
                    tool: definition.name.clone(),
                    param: name.clone(),
                });
            };
            if value.is_null() && !param.required {
                continue;
            }
            if !param.param_type.matches(value) {
                return Err(ArgumentError::TypeMismatch {
                    tool: definition.name.clone(),
                    param: name.clone(),
                    expected: param.param_type.as_str().to_string(),
                    found: json_type_name(value).to_string(),
                });
            }
        }

        Ok(ToolArguments::from_validated(map.clone()))
    }
}
