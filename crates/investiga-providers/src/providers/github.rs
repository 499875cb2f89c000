//! Code footprint through the GitHub repository search API.

use super::common::{pick_str, send_json, JsonReply};
use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// GitHub provider. Works unauthenticated; a token raises the rate limit.
#[derive(Debug, Clone)]
pub struct GithubProvider {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl GithubProvider {
    /// Create a provider against the public API.
    #[must_use]
    pub fn new(client: Client, token: Option<String>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL, token)
    }

    /// Create a provider against a custom endpoint.
    #[must_use]
    pub fn with_base_url(client: Client, base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl LookupProvider for GithubProvider {
    fn provider(&self) -> Provider {
        Provider::Github
    }

    async fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let per_page = options.max_items.to_string();
        let mut request = self
            .client
            .get(format!("{}/search/repositories", self.base_url))
            .query(&[("q", query), ("per_page", per_page.as_str())])
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        match send_json(Provider::Github, request).await? {
            JsonReply::Found(payload) => Ok(normalize_repositories(&payload, options.max_items)),
            JsonReply::NotFound => Ok(Vec::new()),
        }
    }
}

/// Map `items[]` repositories to items.
#[must_use]
pub fn normalize_repositories(payload: &Value, max_items: usize) -> Vec<SearchItem> {
    let Some(repositories) = payload.get("items").and_then(Value::as_array) else {
        return Vec::new();
    };

    repositories
        .iter()
        .take(max_items)
        .map(|repo| {
            let mut item = SearchItem::new(Provider::Github)
                .with_title(pick_str(repo, &["full_name"]).unwrap_or_default())
                .with_description(pick_str(repo, &["description"]).unwrap_or_default())
                .with_url(pick_str(repo, &["html_url"]).unwrap_or_default());
            if let Some(stars) = repo.get("stargazers_count").and_then(Value::as_u64) {
                item = item.with_attr("stars", stars);
            }
            if let Some(language) = pick_str(repo, &["language"]) {
                item = item.with_attr("language", language);
            }
            item
        })
        .collect()
}
