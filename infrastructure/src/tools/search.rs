//! `search` tool - look up an answer with the DuckDuckGo Instant Answer API.
//!
//! The API needs no key and returns at most one instant answer, abstract or
//! definition plus related topics. The body returns the single best answer
//! text, preferring in order:
//!
//! 1. `Answer` - direct factual answer
//! 2. `AbstractText` - summary paragraph (source recorded in metadata)
//! 3. `Definition` - dictionary-style definition
//! 4. first `RelatedTopics[].Text`
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `keywords` | string | Yes | Query keywords |
//!
//! # Authorization
//!
//! `read` on resource type `duckduckgo`.

use authz_domain::{ToolArguments, ToolDefinition, ToolError, ToolKind, ToolOutput, ToolParameter};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Canonical tool name for the search tool.
pub const SEARCH: &str = "search";

/// DuckDuckGo Instant Answer API endpoint (no API key required).
pub const DDG_API_URL: &str = "https://api.duckduckgo.com/";

/// Create the [`ToolDefinition`] for `search`.
pub fn search_definition() -> ToolDefinition {
    ToolDefinition::new(SEARCH, "Use this to search for information.", ToolKind::Search)
        .with_authorization("read", "duckduckgo")
        .with_parameter(ToolParameter::new("keywords", "Query keywords.", true))
}

/// Execute the `search` body against `endpoint`.
pub async fn execute_search(
    client: &reqwest::Client,
    endpoint: &str,
    args: &ToolArguments,
) -> Result<ToolOutput, ToolError> {
    let start = Instant::now();
    let keywords = args.require_string("keywords")?;

    let response = client
        .get(endpoint)
        .query(&[
            ("q", keywords),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ])
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                ToolError::timeout(SEARCH)
            } else {
                ToolError::execution_failed(format!("Search request failed: {}", e))
            }
        })?;

    if !response.status().is_success() {
        return Err(ToolError::execution_failed(format!(
            "Search API returned error: {}",
            response.status()
        )));
    }

    // The API answers with content-type application/x-javascript
    let text = response
        .text()
        .await
        .map_err(|e| ToolError::execution_failed(format!("Failed to read search results: {}", e)))?;
    let body: Value = serde_json::from_str(&text).map_err(|e| {
        ToolError::execution_failed(format!("Failed to parse search results: {}", e))
    })?;

    let (answer, source) = best_answer(&body).ok_or_else(|| ToolError::not_found(keywords))?;
    debug!("Search for '{}' answered from {}", keywords, source);

    Ok(ToolOutput::new(answer)
        .with_source(source)
        .with_duration(start.elapsed().as_millis() as u64))
}

fn non_empty<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data[key].as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Pick the best answer text and where it came from
fn best_answer(data: &Value) -> Option<(String, String)> {
    if let Some(answer) = non_empty(data, "Answer") {
        let source = non_empty(data, "AnswerType").unwrap_or("instant answer");
        return Some((answer.to_string(), source.to_string()));
    }

    if let Some(text) = non_empty(data, "AbstractText") {
        let source = non_empty(data, "AbstractURL")
            .or_else(|| non_empty(data, "AbstractSource"))
            .unwrap_or("abstract");
        return Some((text.to_string(), source.to_string()));
    }

    if let Some(definition) = non_empty(data, "Definition") {
        let source = non_empty(data, "DefinitionURL")
            .or_else(|| non_empty(data, "DefinitionSource"))
            .unwrap_or("definition");
        return Some((definition.to_string(), source.to_string()));
    }

    data["RelatedTopics"]
        .as_array()?
        .iter()
        .find_map(|topic| {
            let text = non_empty(topic, "Text")?;
            let url = non_empty(topic, "FirstURL").unwrap_or("related topic");
            Some((text.to_string(), url.to_string()))
        })
}
