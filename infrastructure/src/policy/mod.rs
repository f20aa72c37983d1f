//! Policy service adapters
//!
//! [`PangeaPolicyClient`] implements the
//! [`PolicyClient`](authz_application::PolicyClient) port against the Pangea
//! AuthZ `/v1/check` endpoint.

mod pangea;
mod protocol;

pub use pangea::PangeaPolicyClient;
