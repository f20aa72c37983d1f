//! Validated tool arguments

use super::value_objects::ToolError;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a proposal's raw arguments do not fit the tool's schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Arguments for tool '{tool}' must be a JSON object, got {found}")]
    NotAnObject { tool: String, found: String },

    #[error("Missing required parameter '{param}' for tool '{tool}'")]
    MissingRequired { tool: String, param: String },

    #[error("Unknown parameter '{param}' for tool '{tool}'")]
    UnknownParameter { tool: String, param: String },

    #[error("Parameter '{param}' for tool '{tool}' must be {expected}, got {found}")]
    TypeMismatch {
        tool: String,
        param: String,
        expected: String,
        found: String,
    },
}

/// Short JSON type name used in validation messages
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Arguments that passed schema validation.
///
/// Only [`ArgumentValidator`](super::traits::ArgumentValidator) implementations
/// construct these, so a body receiving `ToolArguments` can rely on required
/// fields being present with the declared types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments {
    values: Map<String, Value>,
}

impl ToolArguments {
    pub(crate) fn from_validated(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.as_str())
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.values.get(name).and_then(|v| v.as_i64())
    }

    /// Fetch a string argument, as a tool body would
    pub fn require_string(&self, name: &str) -> Result<&str, ToolError> {
        self.get_string(name).ok_or_else(|| {
            ToolError::invalid_argument(format!("Missing string argument: {}", name))
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
