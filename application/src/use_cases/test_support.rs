//! Hand-written port doubles shared by the use case tests

use crate::config::SessionContext;
use crate::ports::audit_logger::{AuditEvent, AuditLogger};
use crate::ports::completion::{CompletionError, CompletionRequest, CompletionRequester};
use crate::ports::policy_client::{PolicyClient, PolicyError, PolicyResponse};
use crate::ports::progress::DispatchProgress;
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use async_trait::async_trait;
use authz_domain::{
    AuthorizationQuery, ParamType, Subject, ToolArguments, ToolCatalog, ToolDefinition, ToolError,
    ToolKind, ToolOutcome, ToolOutput, ToolParameter, ToolProposal,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ==================== Catalog ====================

pub fn test_catalog() -> ToolCatalog {
    ToolCatalog::new()
        .register(
            ToolDefinition::new("search", "Use this to search for information.", ToolKind::Search)
                .with_authorization("read", "duckduckgo")
                .with_parameter(ToolParameter::new("keywords", "Query keywords.", true))
                .with_parameter(
                    ToolParameter::new("delay_ms", "Artificial latency", false)
                        .with_type(ParamType::Integer),
                ),
        )
        .expect("test catalog has unique names")
}

pub fn test_context(user: &str) -> SessionContext {
    SessionContext::new(Subject::user(user).unwrap(), Arc::new(test_catalog())).unwrap()
}

pub fn search(keywords: &str) -> ToolProposal {
    ToolProposal::new("search", json!({ "keywords": keywords }))
}

pub fn slow_search(keywords: &str, delay_ms: u64) -> ToolProposal {
    ToolProposal::new("search", json!({ "keywords": keywords, "delay_ms": delay_ms }))
}

// ==================== Policy ====================

#[derive(Debug, Clone)]
pub enum PolicyBehavior {
    Allow,
    Deny,
    NoDecision,
    Fail(PolicyError),
    Hang,
}

/// Policy double answering per subject id, recording every query
pub struct ScriptedPolicy {
    default: PolicyBehavior,
    per_subject: HashMap<String, PolicyBehavior>,
    queries: Mutex<Vec<AuthorizationQuery>>,
}

impl ScriptedPolicy {
    pub fn new(default: PolicyBehavior) -> Self {
        Self {
            default,
            per_subject: HashMap::new(),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_subject(mut self, id: &str, behavior: PolicyBehavior) -> Self {
        self.per_subject.insert(id.to_string(), behavior);
        self
    }

    pub fn queries(&self) -> Vec<AuthorizationQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl PolicyClient for ScriptedPolicy {
    async fn check(&self, query: &AuthorizationQuery) -> Result<PolicyResponse, PolicyError> {
        self.queries.lock().unwrap().push(query.clone());
        let behavior = self
            .per_subject
            .get(&query.subject.id)
            .unwrap_or(&self.default)
            .clone();
        match behavior {
            PolicyBehavior::Allow => Ok(PolicyResponse::allow()),
            PolicyBehavior::Deny => Ok(PolicyResponse::deny().with_summary("denied by policy")),
            PolicyBehavior::NoDecision => Ok(PolicyResponse::default()),
            PolicyBehavior::Fail(e) => Err(e),
            PolicyBehavior::Hang => std::future::pending().await,
        }
    }
}

// ==================== Executor ====================

/// Search double: counts calls, records keyword order, honours `delay_ms`.
/// Keywords "explode" fail, "panic" panics.
#[derive(Default)]
pub struct CountingExecutor {
    calls: AtomicUsize,
    completed: Mutex<Vec<String>>,
}

impl CountingExecutor {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolExecutorPort for CountingExecutor {
    async fn execute(&self, kind: ToolKind, args: &ToolArguments) -> Result<ToolOutput, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(kind, ToolKind::Search);

        let keywords = args.require_string("keywords")?.to_string();
        if let Some(delay) = args.get_i64("delay_ms") {
            tokio::time::sleep(Duration::from_millis(delay as u64)).await;
        }
        match keywords.as_str() {
            "explode" => return Err(ToolError::execution_failed("upstream returned 503")),
            "panic" => panic!("search body panicked"),
            _ => {}
        }

        self.completed.lock().unwrap().push(keywords.clone());
        Ok(ToolOutput::new(format!("results for {}", keywords)))
    }
}

// ==================== Completion ====================

/// Completion double returning one scripted answer and keeping the request
pub struct ScriptedCompletion {
    answer: Mutex<Option<Result<Vec<ToolProposal>, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedCompletion {
    pub fn proposals(proposals: Vec<ToolProposal>) -> Self {
        Self {
            answer: Mutex::new(Some(Ok(proposals))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: CompletionError) -> Self {
        Self {
            answer: Mutex::new(Some(Err(error))),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionRequester for ScriptedCompletion {
    async fn request(
        &self,
        request: &CompletionRequest,
    ) -> Result<Vec<ToolProposal>, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(CompletionError::InvalidResponse("already consumed".into())))
    }
}

/// Schema double emitting just the tool name
pub struct NameOnlySchema;

impl ToolSchemaPort for NameOnlySchema {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({ "name": tool.name })
    }
}

// ==================== Observers ====================

#[derive(Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<(&'static str, Value)>>,
}

impl RecordingAudit {
    pub fn events(&self) -> Vec<(&'static str, Value)> {
        self.events.lock().unwrap().clone()
    }
}

impl AuditLogger for RecordingAudit {
    fn log(&self, event: AuditEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    pub events: Mutex<Vec<String>>,
}

impl DispatchProgress for RecordingProgress {
    fn on_completion_start(&self) {
        self.events.lock().unwrap().push("completion_start".into());
    }

    fn on_completion_complete(&self, proposals: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("completion_complete:{}", proposals));
    }

    fn on_proposal_complete(&self, index: usize, outcome: &ToolOutcome) {
        self.events
            .lock()
            .unwrap()
            .push(format!("proposal:{}:{}", index, outcome.label()));
    }

    fn on_dispatch_complete(&self, outcomes: &[ToolOutcome]) {
        self.events
            .lock()
            .unwrap()
            .push(format!("dispatch_complete:{}", outcomes.len()));
    }
}
