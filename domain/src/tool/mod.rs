//! Tool domain module
//!
//! Defines the tools the model may propose and how proposals are checked
//! before a body runs.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolProposal │───▶│ ToolCatalog  │───▶│ Validator    │───▶│ ToolOutput   │
//! │ (raw JSON)   │    │ (lookup)     │    │ (arguments)  │    │ / ToolError  │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`ToolCatalog`] - fixed registry, read-only after startup
//! - [`ToolDefinition`] - schema plus authorization mapping (action, resource type)
//! - [`ToolKind`] - closed enum selecting the execution body
//! - [`ToolProposal`] - unvalidated call as produced by the model
//! - [`ToolArguments`] - arguments that passed [`ArgumentValidator`]
//!
//! Execution itself lives behind the application layer's `ToolExecutorPort`.

pub mod arguments;
pub mod entities;
pub mod traits;
pub mod value_objects;

pub use arguments::{ArgumentError, ToolArguments};
pub use entities::{ParamType, ToolCatalog, ToolDefinition, ToolKind, ToolParameter, ToolProposal};
pub use traits::{ArgumentValidator, SchemaArgumentValidator};
pub use value_objects::{ToolError, ToolOutput};
