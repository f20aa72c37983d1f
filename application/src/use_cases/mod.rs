//! Use cases (application services)
//!
//! - [`authorize::AuthorizationGate`] - one fail-closed policy check per proposal
//! - [`dispatch::Dispatcher`] - authorize, validate and execute a batch in order
//! - [`run_session::RunSessionUseCase`] - prompt to ordered outcomes

pub mod authorize;
pub mod dispatch;
pub mod run_session;

#[cfg(test)]
pub(crate) mod test_support;
