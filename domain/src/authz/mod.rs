//! Authorization domain module
//!
//! Everything the gate needs to ask a policy service "may this subject perform
//! this action on this resource?" and to interpret the answer.
//!
//! ```text
//! ┌──────────────┐    ┌────────────────────┐    ┌──────────────────────┐
//! │ Subject      │───▶│ AuthorizationQuery │───▶│ AuthorizationVerdict │
//! │ (who)        │    │ (action, resource) │    │ (allowed, basis)     │
//! └──────────────┘    └────────────────────┘    └──────────────────────┘
//! ```
//!
//! The verdict is constructed only through fail-closed constructors, so the
//! `allowed` flag can be true only for an explicit allow decision.

pub mod query;
pub mod subject;
pub mod verdict;

pub use query::{AuthorizationQuery, Resource};
pub use subject::{Subject, SubjectType};
pub use verdict::{AuthorizationVerdict, DecisionBasis};
