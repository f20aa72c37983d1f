//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are raised while building a session, before any proposal is
/// processed. Per-proposal problems are reported as
/// [`ToolOutcome`](crate::ToolOutcome) variants instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Tool catalog is empty")]
    EmptyCatalog,

    #[error("Tool '{0}' is registered more than once")]
    DuplicateTool(String),

    #[error("Invalid subject: {0}")]
    InvalidSubject(String),

    #[error("Unknown subject type: {0}")]
    UnknownSubjectType(String),
}

impl DomainError {
    /// Check if this error comes from the tool catalog
    pub fn is_catalog_error(&self) -> bool {
        matches!(self, DomainError::EmptyCatalog | DomainError::DuplicateTool(_))
    }
}
