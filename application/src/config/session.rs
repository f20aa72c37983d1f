//! Immutable per-session context

use authz_domain::{DomainError, Subject, ToolCatalog};
use std::sync::Arc;

/// Subject and catalog for one session.
///
/// Constructed once, then shared read-only by the gate and the dispatcher.
#[derive(Debug, Clone)]
pub struct SessionContext {
    subject: Subject,
    catalog: Arc<ToolCatalog>,
}

impl SessionContext {
    /// Rejects an empty catalog, which would make every proposal unknown.
    pub fn new(subject: Subject, catalog: Arc<ToolCatalog>) -> Result<Self, DomainError> {
        if catalog.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }
        Ok(Self { subject, catalog })
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }
}
