//! Domain layer for action-authz
//!
//! This crate contains the core types of the authorization gate: the tool
//! catalog, tool-call proposals, authorization queries and verdicts, and the
//! per-proposal outcomes. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Fail-closed authorization
//!
//! A proposed tool call only runs when the policy service answered with an
//! explicit allow. Every other answer (deny, missing decision, transport
//! failure, timeout) is a rejection; see [`AuthorizationVerdict`].
//!
//! ## One outcome per proposal
//!
//! Each [`ToolProposal`] yields exactly one [`ToolOutcome`], in proposal order.

pub mod authz;
pub mod config;
pub mod core;
pub mod outcome;
pub mod tool;

// Re-export commonly used types
pub use authz::{
    query::{AuthorizationQuery, Resource},
    subject::{Subject, SubjectType},
    verdict::{AuthorizationVerdict, DecisionBasis},
};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use outcome::{NOT_AUTHORIZED, ToolOutcome};
pub use tool::{
    arguments::{ArgumentError, ToolArguments},
    entities::{ParamType, ToolCatalog, ToolDefinition, ToolKind, ToolParameter, ToolProposal},
    traits::{ArgumentValidator, SchemaArgumentValidator},
    value_objects::{ToolError, ToolOutput, ToolOutputMetadata},
};
