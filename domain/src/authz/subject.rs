//! Subject on whose behalf tools are invoked

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of principal being authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    /// A human end user (default)
    #[default]
    User,
    /// A non-human caller such as a batch job
    Service,
}

impl SubjectType {
    pub fn as_str(&self) -> &str {
        match self {
            SubjectType::User => "user",
            SubjectType::Service => "service",
        }
    }
}

impl std::fmt::Display for SubjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "user" => Ok(SubjectType::User),
            "service" => Ok(SubjectType::Service),
            other => Err(DomainError::UnknownSubjectType(other.to_string())),
        }
    }
}

/// Identity supplied once per session. Never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "type")]
    pub subject_type: SubjectType,
    pub id: String,
}

impl Subject {
    /// Create a subject, rejecting blank ids
    pub fn new(subject_type: SubjectType, id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidSubject(
                "subject id must not be empty".to_string(),
            ));
        }
        Ok(Self { subject_type, id })
    }

    pub fn user(id: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(SubjectType::User, id)
    }

    pub fn service(id: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(SubjectType::Service, id)
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.subject_type, self.id)
    }
}
