//! Application-level configuration.
//!
//! - [`BehaviorConfig`] - policy timeout and dispatch concurrency
//! - [`SessionContext`] - immutable per-session subject and catalog
//! - [`SecretString`] - credential wrapper that never prints its value

pub mod behavior;
pub mod secret;
pub mod session;

pub use behavior::BehaviorConfig;
pub use secret::SecretString;
pub use session::SessionContext;
