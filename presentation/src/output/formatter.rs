//! Output formatter trait

use crate::output::console::ConsoleFormatter;
use authz_application::RunSessionOutput;
use authz_domain::{OutputFormat, ToolOutcome};
use serde::Serialize;
use serde_json::Value;

/// Trait for rendering a finished session
pub trait OutputFormatter {
    /// Render every proposal with its outcome
    fn format(&self, output: &RunSessionOutput) -> String;
}

/// Pick the formatter for the configured output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Machine-readable output: one JSON document per session
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonSession<'a> {
    executed: usize,
    total: usize,
    results: Vec<JsonResult<'a>>,
}

#[derive(Serialize)]
struct JsonResult<'a> {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    call_id: Option<&'a str>,
    arguments: &'a Value,
    #[serde(flatten)]
    outcome: &'a ToolOutcome,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, output: &RunSessionOutput) -> String {
        let results = output
            .proposals
            .iter()
            .zip(&output.outcomes)
            .enumerate()
            .map(|(index, (proposal, outcome))| JsonResult {
                index,
                call_id: proposal.id.as_deref(),
                arguments: &proposal.arguments,
                outcome,
            })
            .collect();

        let session = JsonSession {
            executed: output.executed_count(),
            total: output.outcomes.len(),
            results,
        };
        serde_json::to_string_pretty(&session).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use authz_domain::{DecisionBasis, NOT_AUTHORIZED, Subject, ToolOutput, ToolProposal};
    use serde_json::json;

    fn session() -> RunSessionOutput {
        RunSessionOutput {
            proposals: vec![
                ToolProposal::new("search", json!({"keywords": "rust"})).with_id("call_1"),
                ToolProposal::new("search", json!({"keywords": "go"})),
            ],
            outcomes: vec![
                ToolOutcome::Executed {
                    tool: "search".into(),
                    output: ToolOutput::new("A language"),
                },
                ToolOutcome::Rejected {
                    tool: "search".into(),
                    subject: Subject::user("bob").unwrap(),
                    action: "read".into(),
                    reason: NOT_AUTHORIZED.into(),
                    basis: DecisionBasis::Timeout,
                    detail: Some("policy check timed out after 10000ms".into()),
                },
            ],
        }
    }

    #[test]
    fn test_json_output_keeps_order_and_tags() {
        let rendered = JsonFormatter.format(&session());
        let value: Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["executed"], 1);
        assert_eq!(value["total"], 2);
        let results = value["results"].as_array().unwrap();
        assert_eq!(results[0]["outcome"], "executed");
        assert_eq!(results[0]["call_id"], "call_1");
        assert_eq!(results[0]["output"]["content"], "A language");
        assert_eq!(results[1]["outcome"], "rejected");
        assert_eq!(results[1]["reason"], "not authorized");
        assert_eq!(results[1]["basis"], "timeout");
        assert_eq!(results[1]["arguments"]["keywords"], "go");
        assert!(results[1].get("call_id").is_none());
    }

    #[test]
    fn test_empty_session_is_valid_json() {
        let output = RunSessionOutput {
            proposals: vec![],
            outcomes: vec![],
        };
        let value: Value = serde_json::from_str(&JsonFormatter.format(&output)).unwrap();
        assert_eq!(value["total"], 0);
        assert!(value["results"].as_array().unwrap().is_empty());
    }
}
