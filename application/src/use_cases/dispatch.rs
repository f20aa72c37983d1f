//! Dispatcher use case
//!
//! Takes a batch of proposals and produces one [`ToolOutcome`] per proposal,
//! in proposal order. Each proposal goes through:
//!
//! 1. catalog lookup (unknown → `UnknownTool`, no policy query)
//! 2. authorization (not allowed → `Rejected`, body never invoked)
//! 3. argument validation (mismatch → `InvalidArguments`)
//! 4. body execution (`Executed` or `ExecutionFailed`)
//!
//! Proposals share no mutable state, so a failure in one never affects the
//! others. Concurrent mode keeps the output order via `buffered`.

use super::authorize::AuthorizationGate;
use crate::config::{BehaviorConfig, SessionContext};
use crate::ports::audit_logger::{AuditEvent, AuditLogger, NoAuditLogger};
use crate::ports::policy_client::PolicyClient;
use crate::ports::progress::{DispatchProgress, NoProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use authz_domain::{
    ArgumentValidator, NOT_AUTHORIZED, SchemaArgumentValidator, ToolError, ToolOutcome,
    ToolProposal,
};
use futures::{FutureExt, StreamExt, stream};
use serde_json::json;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct Dispatcher<P: PolicyClient + 'static, T: ToolExecutorPort + 'static> {
    gate: AuthorizationGate<P>,
    executor: Arc<T>,
    validator: Arc<dyn ArgumentValidator>,
    audit: Arc<dyn AuditLogger>,
    /// `Some(limit)` enables concurrent dispatch
    concurrency: Option<usize>,
}

impl<P: PolicyClient + 'static, T: ToolExecutorPort + 'static> Dispatcher<P, T> {
    pub fn new(gate: AuthorizationGate<P>, executor: Arc<T>) -> Self {
        Self {
            gate,
            executor,
            validator: Arc::new(SchemaArgumentValidator),
            audit: Arc::new(NoAuditLogger),
            concurrency: None,
        }
    }

    /// Build gate and dispatcher from a [`BehaviorConfig`]
    pub fn from_config(policy: Arc<P>, executor: Arc<T>, config: &BehaviorConfig) -> Self {
        let gate = AuthorizationGate::new(policy).with_timeout(config.policy_timeout);
        let dispatcher = Self::new(gate, executor);
        if config.concurrent {
            dispatcher.with_concurrency(config.max_concurrency)
        } else {
            dispatcher
        }
    }

    pub fn with_audit_logger(mut self, audit: Arc<dyn AuditLogger>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.concurrency = Some(limit.max(1));
        self
    }

    /// Process a batch with default (no-op) progress
    pub async fn dispatch(
        &self,
        proposals: &[ToolProposal],
        ctx: &SessionContext,
    ) -> Vec<ToolOutcome> {
        self.dispatch_with_progress(proposals, ctx, &NoProgress)
            .await
    }

    /// Process a batch, reporting each outcome as it completes.
    ///
    /// The returned vector is index-aligned with `proposals`.
    pub async fn dispatch_with_progress(
        &self,
        proposals: &[ToolProposal],
        ctx: &SessionContext,
        progress: &dyn DispatchProgress,
    ) -> Vec<ToolOutcome> {
        let total = proposals.len();
        info!(
            "Dispatching {} proposal(s) for {} ({})",
            total,
            ctx.subject(),
            match self.concurrency {
                Some(limit) => format!("concurrent, limit {}", limit),
                None => "sequential".to_string(),
            }
        );

        let outcomes = match self.concurrency {
            None => {
                let mut outcomes = Vec::with_capacity(total);
                for (index, proposal) in proposals.iter().enumerate() {
                    outcomes.push(self.process_indexed(index, total, proposal, ctx, progress).await);
                }
                outcomes
            }
            Some(limit) => {
                stream::iter(proposals.iter().enumerate())
                    .map(|(index, proposal)| {
                        self.process_indexed(index, total, proposal, ctx, progress)
                    })
                    .buffered(limit)
                    .collect::<Vec<_>>()
                    .await
            }
        };

        progress.on_dispatch_complete(&outcomes);
        outcomes
    }

    async fn process_indexed(
        &self,
        index: usize,
        total: usize,
        proposal: &ToolProposal,
        ctx: &SessionContext,
        progress: &dyn DispatchProgress,
    ) -> ToolOutcome {
        progress.on_proposal_start(index, total, &proposal.tool_name);
        let outcome = self.process(proposal, ctx).await;
        progress.on_proposal_complete(index, &outcome);
        outcome
    }

    /// Process a single proposal
    pub async fn process(&self, proposal: &ToolProposal, ctx: &SessionContext) -> ToolOutcome {
        let outcome = self.resolve(proposal, ctx).await;
        self.audit.log(AuditEvent::new(
            "outcome",
            json!({
                "subject": ctx.subject(),
                "call_id": proposal.id,
                "outcome": &outcome,
            }),
        ));
        outcome
    }

    async fn resolve(&self, proposal: &ToolProposal, ctx: &SessionContext) -> ToolOutcome {
        let (tool, verdict) = match self.gate.authorize(proposal, ctx).await {
            Ok(resolved) => resolved,
            Err(e) => {
                info!("{}", e);
                return ToolOutcome::UnknownTool { name: e.0 };
            }
        };

        self.audit.log(AuditEvent::new(
            "authorization",
            json!({
                "subject": ctx.subject(),
                "tool": tool.name,
                "action": tool.required_action,
                "resource_type": tool.resource_type,
                "verdict": &verdict,
            }),
        ));

        if !verdict.allowed() {
            info!(
                "{} is not authorized to {} via '{}' ({})",
                ctx.subject(),
                tool.required_action,
                tool.name,
                verdict.basis()
            );
            return ToolOutcome::Rejected {
                tool: tool.name.clone(),
                subject: ctx.subject().clone(),
                action: tool.required_action.clone(),
                reason: NOT_AUTHORIZED.to_string(),
                basis: verdict.basis(),
                detail: verdict.reason().map(str::to_string),
            };
        }

        let args = match self.validator.validate(&proposal.arguments, tool) {
            Ok(args) => args,
            Err(e) => {
                debug!("Argument validation failed: {}", e);
                return ToolOutcome::InvalidArguments {
                    tool: tool.name.clone(),
                    detail: e.to_string(),
                };
            }
        };

        let started = Instant::now();
        let result = AssertUnwindSafe(self.executor.execute(tool.kind, &args))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ToolError::execution_failed("tool body panicked")));
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(mut output) => {
                output.metadata.duration_ms.get_or_insert(elapsed_ms);
                debug!("Tool '{}' completed in {}ms", tool.name, elapsed_ms);
                ToolOutcome::Executed {
                    tool: tool.name.clone(),
                    output,
                }
            }
            Err(error) => {
                warn!("Tool '{}' failed: {}", tool.name, error);
                ToolOutcome::ExecutionFailed {
                    tool: tool.name.clone(),
                    error,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::policy_client::PolicyError;
    use crate::use_cases::test_support::{
        CountingExecutor, PolicyBehavior, RecordingAudit, RecordingProgress, ScriptedPolicy,
        search, slow_search, test_context,
    };
    use authz_domain::DecisionBasis;
    use serde_json::json;
    use std::time::Duration;

    fn dispatcher(
        policy: ScriptedPolicy,
    ) -> (
        Dispatcher<ScriptedPolicy, CountingExecutor>,
        Arc<ScriptedPolicy>,
        Arc<CountingExecutor>,
    ) {
        let policy = Arc::new(policy);
        let executor = Arc::new(CountingExecutor::default());
        let dispatcher = Dispatcher::new(AuthorizationGate::new(policy.clone()), executor.clone());
        (dispatcher, policy, executor)
    }

    // ==================== Scenarios ====================

    #[tokio::test]
    async fn test_allowed_search_executes() {
        let (dispatcher, _, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let ctx = test_context("alice");

        let outcomes = dispatcher.dispatch(&[search("rust")], &ctx).await;

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            ToolOutcome::Executed { tool, output } => {
                assert_eq!(tool, "search");
                assert_eq!(output.content, "results for rust");
                assert!(output.metadata.duration_ms.is_some());
            }
            other => panic!("expected Executed, got {:?}", other),
        }
        assert_eq!(executor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_denied_subject_never_reaches_body() {
        let policy = ScriptedPolicy::new(PolicyBehavior::Allow).with_subject("bob", PolicyBehavior::Deny);
        let (dispatcher, _, executor) = dispatcher(policy);
        let ctx = test_context("bob");

        let outcomes = dispatcher.dispatch(&[search("rust")], &ctx).await;

        match &outcomes[0] {
            ToolOutcome::Rejected {
                reason,
                basis,
                subject,
                action,
                ..
            } => {
                assert_eq!(reason, "not authorized");
                assert_eq!(*basis, DecisionBasis::ExplicitDeny);
                assert_eq!(subject.id, "bob");
                assert_eq!(action, "read");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool_issues_no_policy_query() {
        let (dispatcher, policy, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let ctx = test_context("alice");

        let proposal = ToolProposal::new("delete_everything", json!({"confirm": true}));
        let outcomes = dispatcher.dispatch(&[proposal], &ctx).await;

        assert_eq!(
            outcomes,
            vec![ToolOutcome::UnknownTool {
                name: "delete_everything".into()
            }]
        );
        assert_eq!(policy.call_count(), 0);
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_policy_timeout_rejects_with_timeout_basis() {
        let policy = Arc::new(ScriptedPolicy::new(PolicyBehavior::Hang));
        let executor = Arc::new(CountingExecutor::default());
        let gate = AuthorizationGate::new(policy).with_timeout(Duration::from_secs(2));
        let dispatcher = Dispatcher::new(gate, executor.clone());
        let ctx = test_context("alice");

        let outcomes = dispatcher.dispatch(&[search("rust")], &ctx).await;

        match &outcomes[0] {
            ToolOutcome::Rejected { basis, detail, .. } => {
                assert_eq!(*basis, DecisionBasis::Timeout);
                assert_ne!(*basis, DecisionBasis::ExplicitDeny);
                assert!(detail.as_deref().unwrap().contains("timed out"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_required_argument_after_allow() {
        let (dispatcher, policy, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let ctx = test_context("alice");

        let proposal = ToolProposal::new("search", json!({}));
        let outcomes = dispatcher.dispatch(&[proposal], &ctx).await;

        match &outcomes[0] {
            ToolOutcome::InvalidArguments { tool, detail } => {
                assert_eq!(tool, "search");
                assert!(detail.contains("keywords"));
            }
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
        assert_eq!(policy.call_count(), 1);
        assert_eq!(executor.call_count(), 0);
    }

    /// Records how many policy queries had been made when each body started
    struct PolicyWitnessExecutor {
        policy: Arc<ScriptedPolicy>,
        queries_at_entry: std::sync::Mutex<Vec<usize>>,
    }

    #[async_trait::async_trait]
    impl ToolExecutorPort for PolicyWitnessExecutor {
        async fn execute(
            &self,
            _kind: authz_domain::ToolKind,
            _args: &authz_domain::ToolArguments,
        ) -> Result<authz_domain::ToolOutput, ToolError> {
            self.queries_at_entry
                .lock()
                .unwrap()
                .push(self.policy.call_count());
            Ok(authz_domain::ToolOutput::new("ok"))
        }
    }

    #[tokio::test]
    async fn test_policy_is_queried_before_each_body_runs() {
        let policy = Arc::new(ScriptedPolicy::new(PolicyBehavior::Allow));
        let executor = Arc::new(PolicyWitnessExecutor {
            policy: policy.clone(),
            queries_at_entry: std::sync::Mutex::new(Vec::new()),
        });
        let dispatcher = Dispatcher::new(AuthorizationGate::new(policy.clone()), executor.clone());
        let ctx = test_context("alice");

        let outcomes = dispatcher
            .dispatch(&[search("first"), search("second")], &ctx)
            .await;

        assert!(outcomes.iter().all(ToolOutcome::is_executed));
        // Sequential mode: body N starts after exactly N policy queries
        assert_eq!(*executor.queries_at_entry.lock().unwrap(), vec![1, 2]);
    }

    // ==================== Fail-closed ====================

    #[tokio::test]
    async fn test_missing_decision_never_executes() {
        let (dispatcher, _, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::NoDecision));
        let ctx = test_context("alice");

        let outcomes = dispatcher.dispatch(&[search("rust")], &ctx).await;

        assert!(outcomes[0].is_rejected());
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_rejects_without_crashing() {
        let (dispatcher, _, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Fail(
            PolicyError::RequestFailed {
                status: 502,
                message: "bad gateway".into(),
            },
        )));
        let ctx = test_context("alice");

        let outcomes = dispatcher
            .dispatch(&[search("a"), search("b")], &ctx)
            .await;

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            match outcome {
                ToolOutcome::Rejected { basis, .. } => assert_eq!(*basis, DecisionBasis::Transport),
                other => panic!("expected Rejected, got {:?}", other),
            }
        }
        assert_eq!(executor.call_count(), 0);
    }

    // ==================== Isolation and ordering ====================

    #[tokio::test]
    async fn test_mixed_batch_outcomes_are_independent() {
        let (dispatcher, policy, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let ctx = test_context("alice");

        let proposals = vec![
            search("first"),
            ToolProposal::new("delete_everything", json!({})),
            search("explode"),
            ToolProposal::new("search", json!({"keywords": 7})),
            search("panic"),
            search("last"),
        ];
        let outcomes = dispatcher.dispatch(&proposals, &ctx).await;

        let labels: Vec<_> = outcomes.iter().map(|o| o.label()).collect();
        assert_eq!(
            labels,
            vec![
                "executed",
                "unknown_tool",
                "execution_failed",
                "invalid_arguments",
                "execution_failed",
                "executed"
            ]
        );
        // one policy query per known-tool proposal
        assert_eq!(policy.call_count(), 5);
        assert_eq!(executor.call_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_mode_preserves_proposal_order() {
        let (dispatcher, _, executor) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let dispatcher = dispatcher.with_concurrency(4);
        let ctx = test_context("alice");

        let proposals = vec![
            slow_search("slow", 300),
            slow_search("medium", 100),
            slow_search("fast", 0),
        ];
        let outcomes = dispatcher.dispatch(&proposals, &ctx).await;

        let contents: Vec<_> = outcomes
            .iter()
            .map(|o| match o {
                ToolOutcome::Executed { output, .. } => output.content.clone(),
                other => panic!("expected Executed, got {:?}", other),
            })
            .collect();
        assert_eq!(
            contents,
            vec!["results for slow", "results for medium", "results for fast"]
        );
        // bodies really did overlap
        assert_eq!(executor.completion_order(), vec!["fast", "medium", "slow"]);
    }

    #[tokio::test]
    async fn test_from_config_applies_concurrency() {
        let policy = Arc::new(ScriptedPolicy::new(PolicyBehavior::Allow));
        let executor = Arc::new(CountingExecutor::default());
        let config = BehaviorConfig::default().with_concurrency(2);

        let dispatcher = Dispatcher::from_config(policy, executor, &config);
        assert_eq!(dispatcher.concurrency, Some(2));
        assert_eq!(dispatcher.gate.timeout(), config.policy_timeout);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let (dispatcher, policy, _) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let ctx = test_context("alice");

        assert!(dispatcher.dispatch(&[], &ctx).await.is_empty());
        assert_eq!(policy.call_count(), 0);
    }

    // ==================== Observers ====================

    #[tokio::test]
    async fn test_audit_records_authorization_and_outcome() {
        let audit = Arc::new(RecordingAudit::default());
        let (dispatcher, _, _) = dispatcher(
            ScriptedPolicy::new(PolicyBehavior::Allow).with_subject("bob", PolicyBehavior::Deny),
        );
        let dispatcher = dispatcher.with_audit_logger(audit.clone());
        let ctx = test_context("bob");

        dispatcher.dispatch(&[search("rust").with_id("call_9")], &ctx).await;

        let events = audit.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, "authorization");
        assert_eq!(events[0].1["verdict"]["basis"], "explicit_deny");
        assert_eq!(events[0].1["verdict"]["allowed"], false);
        assert_eq!(events[1].0, "outcome");
        assert_eq!(events[1].1["outcome"]["outcome"], "rejected");
        assert_eq!(events[1].1["call_id"], "call_9");
    }

    #[tokio::test]
    async fn test_progress_sees_every_proposal() {
        let progress = RecordingProgress::default();
        let (dispatcher, _, _) = dispatcher(ScriptedPolicy::new(PolicyBehavior::Allow));
        let ctx = test_context("alice");

        dispatcher
            .dispatch_with_progress(
                &[search("a"), ToolProposal::new("nope", json!({}))],
                &ctx,
                &progress,
            )
            .await;

        assert_eq!(
            *progress.events.lock().unwrap(),
            vec![
                "proposal:0:executed".to_string(),
                "proposal:1:unknown_tool".to_string(),
                "dispatch_complete:2".to_string(),
            ]
        );
    }
}
