//! Web mentions through the DuckDuckGo Instant Answer API.

use super::common::{pick_str, send_json, JsonReply};
use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.duckduckgo.com";

/// DuckDuckGo provider.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    client: Client,
    base_url: String,
}

impl DuckDuckGoProvider {
    /// Create a provider against the public endpoint.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Create a provider against a custom endpoint.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl LookupProvider for DuckDuckGoProvider {
    fn provider(&self) -> Provider {
        Provider::DuckDuckGo
    }

    async fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.client.get(format!("{}/", self.base_url)).query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ]);
        match send_json(Provider::DuckDuckGo, request).await? {
            JsonReply::Found(payload) => Ok(normalize_instant_answer(
                query,
                &payload,
                options.max_items,
            )),
            JsonReply::NotFound => Ok(Vec::new()),
        }
    }
}

/// Related topics first (nested `Topics` groups flattened), falling back to
/// the abstract when there are none.
#[must_use]
pub fn normalize_instant_answer(query: &str, payload: &Value, max_items: usize) -> Vec<SearchItem> {
    let mut topics = Vec::new();
    if let Some(related) = payload.get("RelatedTopics").and_then(Value::as_array) {
        collect_topics(related, &mut topics);
    }

    let items: Vec<SearchItem> = topics
        .into_iter()
        .take(max_items)
        .map(|topic| {
            let mut item = SearchItem::new(Provider::DuckDuckGo)
                .with_title(pick_str(topic, &["Text"]).unwrap_or_default())
                .with_raw(topic.clone());
            if let Some(url) = pick_str(topic, &["FirstURL"]) {
                item = item.with_url(url);
            }
            item
        })
        .collect();
    if !items.is_empty() {
        return items;
    }

    match pick_str(payload, &["AbstractText"]) {
        Some(text) => {
            let title = pick_str(payload, &["Heading"]).unwrap_or_else(|| query.to_string());
            let mut item = SearchItem::new(Provider::DuckDuckGo)
                .with_title(title)
                .with_description(text);
            if let Some(url) = pick_str(payload, &["AbstractURL"]) {
                item = item.with_url(url);
            }
            vec![item]
        }
        None => Vec::new(),
    }
}

fn collect_topics<'a>(entries: &'a [Value], out: &mut Vec<&'a Value>) {
    for entry in entries {
        if let Some(nested) = entry.get("Topics").and_then(Value::as_array) {
            collect_topics(nested, out);
        } else if pick_str(entry, &["Text"]).is_some() {
            out.push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_related_topics_with_nested_groups() {
        let payload = json!({
            "RelatedTopics": [
                {"Text": "Heitor Prado - engenheiro", "FirstURL": "https://duckduckgo.com/Heitor_Prado"},
                {"Name": "Outros", "Topics": [
                    {"Text": "Prado (sobrenome)", "FirstURL": "https://duckduckgo.com/Prado"}
                ]},
                {"FirstURL": "https://duckduckgo.com/empty"}
            ]
        });
        let items = normalize_instant_answer("Heitor Prado", &payload, 5);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("Heitor Prado - engenheiro"));
        assert_eq!(items[1].url.as_deref(), Some("https://duckduckgo.com/Prado"));
    }

    #[test]
    fn test_topics_are_limited() {
        let related: Vec<Value> = (0..9)
            .map(|i| json!({"Text": format!("t{i}"), "FirstURL": format!("https://d/{i}")}))
            .collect();
        let items = normalize_instant_answer("q", &json!({"RelatedTopics": related}), 5);
        assert_eq!(items.len(), 5);
    }

    #[test]
    fn test_abstract_fallback() {
        let payload = json!({
            "RelatedTopics": [],
            "AbstractText": "Receita Federal do Brasil",
            "AbstractURL": "https://pt.wikipedia.org/wiki/Receita_Federal",
            "Heading": ""
        });
        let items = normalize_instant_answer("receita federal", &payload, 5);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("receita federal"));
        assert_eq!(
            items[0].description.as_deref(),
            Some("Receita Federal do Brasil")
        );
    }

    #[test]
    fn test_empty_answer() {
        assert!(normalize_instant_answer("q", &json!({"RelatedTopics": []}), 5).is_empty());
    }
}
