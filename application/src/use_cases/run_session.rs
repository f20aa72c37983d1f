//! Run Session use case
//!
//! Prompt in, ordered outcomes out: requests tool-call proposals from the
//! completion provider, then hands them to the [`Dispatcher`].

use super::dispatch::Dispatcher;
use crate::config::SessionContext;
use crate::ports::completion::{CompletionError, CompletionRequest, CompletionRequester, ToolChoice};
use crate::ports::policy_client::PolicyClient;
use crate::ports::progress::{DispatchProgress, NoProgress};
use crate::ports::tool_executor::ToolExecutorPort;
use crate::ports::tool_schema::ToolSchemaPort;
use authz_domain::{ToolOutcome, ToolProposal};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Instruction sent with every prompt
pub const DEFAULT_SYSTEM_PROMPT: &str = "Only call a tool once in a single message.";

/// Errors that abort a session before any proposal is processed
#[derive(Error, Debug)]
pub enum RunSessionError {
    #[error("Prompt is empty")]
    EmptyPrompt,

    #[error("Completion request failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Input for the RunSession use case
#[derive(Debug, Clone)]
pub struct RunSessionInput {
    pub prompt: String,
    pub system_prompt: String,
    pub tool_choice: ToolChoice,
}

impl RunSessionInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            tool_choice: ToolChoice::Required,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = tool_choice;
        self
    }
}

/// Proposals and their outcomes, index-aligned
#[derive(Debug, Clone)]
pub struct RunSessionOutput {
    pub proposals: Vec<ToolProposal>,
    pub outcomes: Vec<ToolOutcome>,
}

impl RunSessionOutput {
    pub fn executed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_executed()).count()
    }

    /// True when there was at least one proposal and none executed
    pub fn nothing_executed(&self) -> bool {
        !self.outcomes.is_empty() && self.executed_count() == 0
    }
}

/// Use case for running one prompt through the gate
pub struct RunSessionUseCase<
    C: CompletionRequester + 'static,
    P: PolicyClient + 'static,
    T: ToolExecutorPort + 'static,
> {
    completion: Arc<C>,
    schema: Arc<dyn ToolSchemaPort>,
    dispatcher: Dispatcher<P, T>,
}

impl<C, P, T> RunSessionUseCase<C, P, T>
where
    C: CompletionRequester + 'static,
    P: PolicyClient + 'static,
    T: ToolExecutorPort + 'static,
{
    pub fn new(
        completion: Arc<C>,
        schema: Arc<dyn ToolSchemaPort>,
        dispatcher: Dispatcher<P, T>,
    ) -> Self {
        Self {
            completion,
            schema,
            dispatcher,
        }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunSessionInput,
        ctx: &SessionContext,
    ) -> Result<RunSessionOutput, RunSessionError> {
        self.execute_with_progress(input, ctx, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunSessionInput,
        ctx: &SessionContext,
        progress: &dyn DispatchProgress,
    ) -> Result<RunSessionOutput, RunSessionError> {
        if input.prompt.trim().is_empty() {
            return Err(RunSessionError::EmptyPrompt);
        }

        let request = CompletionRequest::new(input.system_prompt, input.prompt)
            .with_tools(self.schema.all_tools_schema(ctx.catalog()))
            .with_tool_choice(input.tool_choice);

        info!(
            "Requesting tool calls for {} with {} tool(s) available",
            ctx.subject(),
            request.tools.len()
        );
        progress.on_completion_start();
        let proposals = self.completion.request(&request).await?;
        progress.on_completion_complete(proposals.len());

        if proposals.is_empty() {
            debug!("Provider proposed no tool calls");
        }

        let outcomes = self
            .dispatcher
            .dispatch_with_progress(&proposals, ctx, progress)
            .await;

        info!(
            "Session finished: {}/{} proposal(s) executed",
            outcomes.iter().filter(|o| o.is_executed()).count(),
            outcomes.len()
        );

        Ok(RunSessionOutput {
            proposals,
            outcomes,
        })
    }
}
