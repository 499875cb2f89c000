//! Encyclopedia mentions through the MediaWiki search API.

use super::common::{pick, pick_str, send_json, strip_html, JsonReply};
use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

/// Wikipedia provider for one language edition.
#[derive(Debug, Clone)]
pub struct WikipediaProvider {
    client: Client,
    lang: String,
    base_url: String,
}

impl WikipediaProvider {
    /// Create a provider for `https://{lang}.wikipedia.org`.
    #[must_use]
    pub fn new(client: Client, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        let base_url = format!("https://{lang}.wikipedia.org");
        Self {
            client,
            lang,
            base_url,
        }
    }

    /// Create a provider whose API lives at a custom endpoint. Article links
    /// still point at the public wiki.
    #[must_use]
    pub fn with_base_url(client: Client, lang: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            lang: lang.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Public article URL for a page title.
#[must_use]
pub fn article_url(lang: &str, title: &str) -> String {
    let slug = title.trim().replace(' ', "_");
    format!(
        "https://{lang}.wikipedia.org/wiki/{}",
        urlencoding::encode(&slug)
    )
}

#[async_trait]
impl LookupProvider for WikipediaProvider {
    fn provider(&self) -> Provider {
        Provider::Wikipedia
    }

    async fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let limit = options.max_items.to_string();
        let request = self
            .client
            .get(format!("{}/w/api.php", self.base_url))
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
                ("srlimit", limit.as_str()),
                ("utf8", "1"),
            ]);
        match send_json(Provider::Wikipedia, request).await? {
            JsonReply::Found(payload) => Ok(normalize_search(&self.lang, &payload, options.max_items)),
            JsonReply::NotFound => Ok(Vec::new()),
        }
    }
}

/// Map `query.search[]` hits to items.
#[must_use]
pub fn normalize_search(lang: &str, payload: &Value, max_items: usize) -> Vec<SearchItem> {
    let Some(hits) = pick(payload, &["query", "search"]).and_then(Value::as_array) else {
        return Vec::new();
    };

    hits.iter()
        .filter_map(|hit| pick_str(hit, &["title"]).map(|title| (hit, title)))
        .take(max_items)
        .map(|(hit, title)| {
            let snippet = pick_str(hit, &["snippet"])
                .map(|s| strip_html(&s))
                .unwrap_or_default();
            SearchItem::new(Provider::Wikipedia)
                .with_url(article_url(lang, &title))
                .with_title(title)
                .with_description(snippet)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_url() {
        assert_eq!(
            article_url("pt", "São Paulo"),
            "https://pt.wikipedia.org/wiki/S%C3%A3o_Paulo"
        );
    }

    #[test]
    fn test_normalize_search() {
        let payload = json!({"query": {"search": [
            {"title": "Receita Federal", "snippet": "A <span class=\"searchmatch\">Receita</span> Federal"},
            {"snippet": "sem título"}
        ]}});
        let items = normalize_search("pt", &payload, 5);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("Receita Federal"));
        assert_eq!(items[0].description.as_deref(), Some("A Receita Federal"));
        assert_eq!(
            items[0].url.as_deref(),
            Some("https://pt.wikipedia.org/wiki/Receita_Federal")
        );
    }

    #[test]
    fn test_missing_search_block() {
        assert!(normalize_search("en", &json!({"batchcomplete": ""}), 5).is_empty());
    }
}
