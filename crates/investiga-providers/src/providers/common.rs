//! Common utilities shared across lookup providers.

use crate::error::{ProviderError, Result};
use investiga_core::Provider;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// A key path into a JSON payload, e.g. `&["company", "name"]`.
pub type KeyPath<'a> = &'a [&'a str];

/// Build a standard HTTP client with common timeout settings.
///
/// # Arguments
/// * `timeout_secs` - Timeout in seconds (defaults to 15 if not specified)
/// * `user_agent` - User agent sent with every request
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout_secs: Option<u64>, user_agent: &str) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs.unwrap_or(15)))
        .user_agent(user_agent)
        .build()
        .map_err(|e| ProviderError::Internal(format!("failed to create HTTP client: {e}")))
}

/// Outcome of a JSON request.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonReply {
    /// 2xx with a JSON body
    Found(Value),
    /// 404
    NotFound,
}

/// Send a request and parse the body as JSON.
///
/// 404 maps to [`JsonReply::NotFound`]; any other non-success status is an
/// error. The body is parsed from text so vendors that mislabel their
/// content type still work.
pub async fn send_json(provider: Provider, request: RequestBuilder) -> Result<JsonReply> {
    let response = request.send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Ok(JsonReply::NotFound);
    }
    if !status.is_success() {
        return Err(ProviderError::Http {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map(JsonReply::Found)
        .map_err(|e| ProviderError::Parse {
            provider,
            message: e.to_string(),
        })
}

/// Follow a key path.
#[must_use]
pub fn pick<'a>(value: &'a Value, path: KeyPath<'_>) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// String at a key path; numbers are rendered, blanks are skipped.
#[must_use]
pub fn pick_str(value: &Value, path: KeyPath<'_>) -> Option<String> {
    match pick(value, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First candidate path that yields a string. First match wins.
#[must_use]
pub fn first_str(value: &Value, candidates: &[KeyPath<'_>]) -> Option<String> {
    candidates.iter().find_map(|path| pick_str(value, path))
}

/// Array at the first candidate path that holds one.
#[must_use]
pub fn first_array<'a>(value: &'a Value, candidates: &[KeyPath<'_>]) -> Option<&'a Vec<Value>> {
    candidates
        .iter()
        .find_map(|path| pick(value, path).and_then(Value::as_array))
}

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid HTML tag regex"));

/// Remove HTML tags and collapse whitespace.
#[must_use]
pub fn strip_html(s: &str) -> String {
    HTML_TAG_REGEX
        .replace_all(s, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Cut a string to at most `max` characters, adding an ellipsis when cut.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(max).collect();
    cut.push('…');
    cut
}

/// Join the non-empty parts with a separator.
#[must_use]
pub fn join_present<I, S>(parts: I, separator: &str) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .flatten()
        .filter(|p| !p.as_ref().trim().is_empty())
        .map(|p| p.as_ref().trim().to_string())
        .collect::<Vec<_>>()
        .join(separator)
}
