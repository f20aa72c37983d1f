//! Console output formatter for session outcomes

use crate::output::formatter::OutputFormatter;
use authz_application::RunSessionOutput;
use authz_domain::{Subject, SubjectType, ToolOutcome, ToolProposal};
use colored::Colorize;

/// Formats session outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every proposal followed by a summary line
    pub fn format(output: &RunSessionOutput) -> String {
        if output.outcomes.is_empty() {
            return format!("{}\n", "The model proposed no tool calls.".dimmed());
        }

        let mut text = String::new();
        let total = output.outcomes.len();

        for (index, (proposal, outcome)) in output.proposals.iter().zip(&output.outcomes).enumerate()
        {
            if total > 1 {
                text.push_str(&Self::proposal_header(index, total, proposal));
                text.push('\n');
            }
            text.push_str(&Self::format_outcome(outcome));
            text.push('\n');
        }

        if total > 1 {
            text.push_str(&Self::footer(output.executed_count(), total));
        }

        text
    }

    /// One outcome, without proposal context
    pub fn format_outcome(outcome: &ToolOutcome) -> String {
        match outcome {
            ToolOutcome::Executed { output, .. } => output.content.clone(),
            ToolOutcome::Rejected {
                tool,
                subject,
                action,
                detail,
                ..
            } => {
                let line = Self::denial_line(subject, action, tool).red().to_string();
                match detail {
                    Some(detail) => format!("{}\n{}", line, format!("  ({})", detail).dimmed()),
                    None => line,
                }
            }
            ToolOutcome::InvalidArguments { tool, detail } => {
                format!("{} {}: {}", "Invalid arguments for".yellow(), tool.bold(), detail)
            }
            ToolOutcome::UnknownTool { name } => {
                format!("{} {}", "Unknown tool:".yellow(), name.bold())
            }
            ToolOutcome::ExecutionFailed { tool, error } => {
                format!("{} {}", format!("Tool '{}' failed:", tool).red(), error)
            }
        }
    }

    /// Message naming who was denied, which action and through which tool
    pub fn denial_line(subject: &Subject, action: &str, tool: &str) -> String {
        let who = match subject.subject_type {
            SubjectType::User => "User",
            SubjectType::Service => "Service",
        };
        format!(
            "{} {} is not authorized to {} via '{}'.",
            who, subject.id, action, tool
        )
    }

    fn proposal_header(index: usize, total: usize, proposal: &ToolProposal) -> String {
        let label = format!("[{}/{}] {}", index + 1, total, proposal.tool_name);
        match &proposal.id {
            Some(id) => format!("{} {}", label.cyan().bold(), id.dimmed()),
            None => label.cyan().bold().to_string(),
        }
    }

    fn footer(executed: usize, total: usize) -> String {
        let summary = format!("{}/{} tool calls executed", executed, total);
        let summary = if executed == total {
            summary.green()
        } else {
            summary.yellow()
        };
        format!("{}\n{}\n", "-".repeat(40).dimmed(), summary)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &RunSessionOutput) -> String {
        Self::format(output)
    }
}
