//! Remote categorization through an external text-completion provider
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::assignment::CategoryAssignment;
use crate::config::OrganizerConfig;
use crate::error::{ClassifyError, Result};
use crate::storage::Credential;
use crate::tab_data::{TabDescriptor, TabId};

/// Fixed instruction sent with every completion request
pub const GROUPING_INSTRUCTION: &str = "You organize browser tabs into groups. \
Given a list of tabs with id, title, and url, return a JSON object where keys are short \
group names (1-2 words, lowercase) and values are arrays of tab ids. Use 3-7 groups max. \
Group by topic, not by website. Return ONLY valid JSON, no markdown.";

static FENCE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[A-Za-z0-9_-]*[ \t]*\r?\n?").expect("valid fence regex"));
static FENCE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n?```$").expect("valid fence regex"));

/// What the provider sees of a tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSummary {
    pub id: TabId,
    pub title: String,
    pub url: String,
}

impl TabSummary {
    pub fn from_descriptor(tab: &TabDescriptor, max_path_chars: usize) -> TabSummary {
        TabSummary {
            id: tab.id,
            title: tab.title.clone(),
            url: truncate_url(&tab.url, max_path_chars),
        }
    }
}

/// Request handed to the completion bridge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub api_key: String,
    pub instruction: String,
    /// JSON array of `TabSummary`
    pub payload: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_ms: u32,
}

/// Response from the completion bridge: `{text}` or `{error}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CompletionResponse {
    Failure { error: String },
    Success { text: String },
}

/// The text-completion collaborator
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse>;
}

/// Keep host and path (path capped at `max_path_chars`), dropping scheme,
/// port, query and fragment
pub fn truncate_url(url: &str, max_path_chars: usize) -> String {
    match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let path: String = parsed.path().chars().take(max_path_chars).collect();
            format!("{}{}", host, path)
        }
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .chars()
            .take(max_path_chars)
            .collect(),
    }
}

/// Remove a leading ```lang fence and a trailing ``` fence, if present
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let text = FENCE_OPEN.find(text).map_or(text, |m| &text[m.end()..]);
    let text = FENCE_CLOSE.find(text).map_or(text, |m| &text[..m.start()]);
    text.trim()
}

/// Parse provider output into a category mapping.
///
/// The output must be a non-empty JSON object whose values are arrays. Ids
/// may be numbers or numeric strings; anything else is dropped.
pub fn parse_assignment(text: &str) -> Result<CategoryAssignment> {
    let value: Value = serde_json::from_str(strip_code_fences(text))?;
    let groups = value
        .as_object()
        .ok_or_else(|| ClassifyError::UnexpectedShape("expected a JSON object".to_string()))?;

    if groups.is_empty() {
        return Err(ClassifyError::NoGroups);
    }

    let mut assignment = CategoryAssignment::new();
    let mut undecodable = 0;

    for (name, ids) in groups {
        let ids = ids.as_array().ok_or_else(|| {
            ClassifyError::UnexpectedShape(format!("group '{}' is not an array", name))
        })?;
        for id in ids {
            match tab_id_from_json(id) {
                Some(id) => assignment.push(name, id),
                None => undecodable += 1,
            }
        }
    }

    if undecodable > 0 {
        log::debug!("Dropped {} undecodable tab ids from remote response", undecodable);
    }

    Ok(assignment)
}

fn tab_id_from_json(value: &Value) -> Option<TabId> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| TabId::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Categorize tabs through the completion provider.
///
/// Fails on transport errors, provider errors and malformed output; never
/// returns a partial mapping. A successful result is reconciled into a
/// strict partition of the input tab ids.
pub async fn categorize_with_ai<C: CompletionClient>(
    client: &C,
    tabs: &[TabDescriptor],
    credential: &Credential,
    config: &OrganizerConfig,
) -> Result<CategoryAssignment> {
    let summaries: Vec<TabSummary> = tabs
        .iter()
        .map(|tab| TabSummary::from_descriptor(tab, config.max_path_chars))
        .collect();
    let payload =
        serde_json::to_string(&summaries).map_err(|e| ClassifyError::Payload(e.to_string()))?;

    let request = CompletionRequest {
        api_key: credential.expose().to_string(),
        instruction: GROUPING_INSTRUCTION.to_string(),
        payload,
        model: config.model.clone(),
        max_tokens: config.max_tokens,
        timeout_ms: config.request_timeout_ms,
    };

    log::debug!("Requesting remote grouping for {} tabs", tabs.len());
    let text = match client.complete(&request).await? {
        CompletionResponse::Failure { error } => return Err(ClassifyError::Provider(error)),
        CompletionResponse::Success { text } => text,
    };

    let input: Vec<TabId> = tabs.iter().map(|t| t.id).collect();
    let (assignment, report) = parse_assignment(&text)?.reconcile(&input);
    if !report.is_clean() {
        log::warn!(
            "Remote grouping corrected: {} foreign, {} duplicate, {} missing tab ids",
            report.foreign,
            report.duplicates,
            report.missing
        );
    }

    Ok(assignment)
}
