//! Application layer for action-authz
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, SecretString, SessionContext};
pub use ports::{
    audit_logger::{AuditEvent, AuditLogger, NoAuditLogger},
    completion::{CompletionError, CompletionRequest, CompletionRequester, ToolChoice},
    policy_client::{PolicyClient, PolicyError, PolicyResponse},
    progress::{DispatchProgress, NoProgress},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::authorize::{AuthorizationGate, UnknownToolError};
pub use use_cases::dispatch::Dispatcher;
pub use use_cases::run_session::{
    RunSessionError, RunSessionInput, RunSessionOutput, RunSessionUseCase,
};
