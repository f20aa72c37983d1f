//! Ports (interfaces) for external dependencies
//!
//! Ports define the interfaces that the application layer uses to interact
//! with external systems. Adapters in the infrastructure layer implement these.

pub mod audit_logger;
pub mod completion;
pub mod policy_client;
pub mod progress;
pub mod tool_executor;
pub mod tool_schema;
