//! Progress notification port
//!
//! Defines the interface for reporting progress while a session runs.

use authz_domain::ToolOutcome;

/// Callback for progress updates during a session
///
/// Implementations live in the presentation layer. Every method has a no-op
/// default so reporters only implement what they display.
pub trait DispatchProgress: Send + Sync {
    /// Completion request sent to the provider
    fn on_completion_start(&self) {}

    /// Provider returned `proposals` tool calls
    fn on_completion_complete(&self, _proposals: usize) {}

    /// Proposal `index` (0-based) of `total` started
    fn on_proposal_start(&self, _index: usize, _total: usize, _tool: &str) {}

    /// Proposal `index` finished with `outcome`
    fn on_proposal_complete(&self, _index: usize, _outcome: &ToolOutcome) {}

    /// Every proposal has an outcome
    fn on_dispatch_complete(&self, _outcomes: &[ToolOutcome]) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DispatchProgress for NoProgress {}
