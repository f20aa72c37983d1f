//! Wire types for the Pangea AuthZ check endpoint.
//!
//! Every Pangea service wraps its payload in the same envelope:
//!
//! ```json
//! { "request_id": "...", "status": "Success", "summary": "...", "result": { ... } }
//! ```
//!
//! `result` is absent or null when the request did not succeed.

use authz_domain::{Resource, Subject};
use serde::{Deserialize, Serialize};

/// Envelope status for a successful request
pub const STATUS_SUCCESS: &str = "Success";

/// `POST /v1/check` request body
#[derive(Debug, Clone, Serialize)]
pub struct CheckRequest<'a> {
    pub subject: &'a Subject,
    pub action: &'a str,
    pub resource: &'a Resource,
}

/// Response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct PangeaResponse<T> {
    #[serde(default)]
    pub request_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub result: Option<T>,
}

/// `result` of a check
#[derive(Debug, Clone, Deserialize)]
pub struct CheckResult {
    /// Absent when the service could not reach a decision
    #[serde(default)]
    pub allowed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let subject = Subject::user("alice").unwrap();
        let resource = Resource::of_type("duckduckgo");
        let body = serde_json::to_value(CheckRequest {
            subject: &subject,
            action: "read",
            resource: &resource,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "subject": {"type": "user", "id": "alice"},
                "action": "read",
                "resource": {"type": "duckduckgo"}
            })
        );
    }

    #[test]
    fn test_parse_allowed() {
        let json = r#"{
            "request_id": "prq_1",
            "status": "Success",
            "summary": "allowed",
            "result": {"schema_id": "pzs_1", "schema_version": 3, "depth": 1, "allowed": true}
        }"#;
        let response: PangeaResponse<CheckResult> = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, STATUS_SUCCESS);
        assert_eq!(response.result.unwrap().allowed, Some(true));
    }

    #[test]
    fn test_parse_null_result() {
        let json = r#"{"status": "ValidationError", "summary": "bad subject", "result": null}"#;
        let response: PangeaResponse<CheckResult> = serde_json::from_str(json).unwrap();
        assert!(response.result.is_none());
        assert_eq!(response.summary.as_deref(), Some("bad subject"));
    }
}
