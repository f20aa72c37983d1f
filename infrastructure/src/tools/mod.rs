//! Tool adapters
//!
//! - [`builtin_catalog`] - the fixed catalog offered to the model
//! - [`LocalToolExecutor`] - runs bodies by [`ToolKind`](authz_domain::ToolKind)
//! - [`JsonSchemaToolConverter`] - catalog to provider tool schemas

mod executor;
mod schema;
pub mod search;

pub use executor::LocalToolExecutor;
pub use schema::JsonSchemaToolConverter;

use authz_domain::{DomainError, ToolCatalog};

/// Catalog of every built-in tool.
pub fn builtin_catalog() -> Result<ToolCatalog, DomainError> {
    ToolCatalog::new().register(search::search_definition())
}
