//! Completion provider adapters
//!
//! [`OpenAiCompletionRequester`] implements the
//! [`CompletionRequester`](authz_application::CompletionRequester) port
//! against an OpenAI-compatible `/v1/chat/completions` endpoint.

mod openai;
mod protocol;

pub use openai::OpenAiCompletionRequester;
