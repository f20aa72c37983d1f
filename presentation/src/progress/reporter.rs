//! Progress reporting while a session runs

use authz_application::DispatchProgress;
use authz_domain::ToolOutcome;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner for the completion request, then a bar over the proposals
///
/// Draws to stderr so stdout stays clean for `-o json`.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn dispatch_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn replace(&self, next: Option<ProgressBar>) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(previous) = bar.take() {
                previous.finish_and_clear();
            }
            *bar = next;
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                f(pb);
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn outcome_mark(outcome: &ToolOutcome) -> String {
    if outcome.is_executed() {
        format!("{} {}", "v".green(), outcome.tool_name())
    } else {
        format!("{} {} ({})", "x".red(), outcome.tool_name(), outcome.label())
    }
}

impl DispatchProgress for ProgressReporter {
    fn on_completion_start(&self) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message("Asking the model for tool calls...");
        pb.enable_steady_tick(Duration::from_millis(100));
        self.replace(Some(pb));
    }

    fn on_completion_complete(&self, proposals: usize) {
        self.replace(None);
        if proposals > 0 {
            let pb = ProgressBar::new(proposals as u64);
            pb.set_style(Self::dispatch_style());
            pb.set_prefix("Authorizing");
            pb.enable_steady_tick(Duration::from_millis(100));
            self.replace(Some(pb));
        }
    }

    fn on_proposal_start(&self, _index: usize, _total: usize, tool: &str) {
        self.with_bar(|pb| pb.set_message(tool.to_string()));
    }

    fn on_proposal_complete(&self, _index: usize, outcome: &ToolOutcome) {
        self.with_bar(|pb| {
            pb.set_message(outcome_mark(outcome));
            pb.inc(1);
        });
    }

    fn on_dispatch_complete(&self, _outcomes: &[ToolOutcome]) {
        self.replace(None);
    }
}

/// Plain line-per-event progress on stderr (no animation)
pub struct SimpleProgress;

impl DispatchProgress for SimpleProgress {
    fn on_completion_start(&self) {
        eprintln!("{} {}", "->".cyan(), "Requesting tool calls".bold());
    }

    fn on_completion_complete(&self, proposals: usize) {
        eprintln!("  {} proposal(s)", proposals);
    }

    fn on_proposal_complete(&self, index: usize, outcome: &ToolOutcome) {
        eprintln!("  [{}] {}", index + 1, outcome_mark(outcome));
    }
}
