//! Breach lookup through Have I Been Pwned (API v3).

use super::common::{first_str, pick_str, send_json, strip_html, truncate_chars, JsonReply};
use crate::error::{ProviderError, Result};
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents;
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://haveibeenpwned.com/api/v3";
const SUMMARY_CHARS: usize = 140;

/// Have I Been Pwned provider.
#[derive(Debug, Clone)]
pub struct HibpProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HibpProvider {
    /// Create a provider against the public HIBP endpoint.
    #[must_use]
    pub fn new(client: Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL, api_key)
    }

    /// Create a provider against a custom endpoint.
    #[must_use]
    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl LookupProvider for HibpProvider {
    fn provider(&self) -> Provider {
        Provider::EmailHibp
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let email = documents::normalize_email(query);
        if !documents::is_valid_email(&email) {
            return Ok(Vec::new());
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                provider: Provider::EmailHibp,
                missing: "api key",
            })?;

        let request = self
            .client
            .get(format!(
                "{}/breachedaccount/{}",
                self.base_url,
                urlencoding::encode(&email)
            ))
            .query(&[("truncateResponse", "false")])
            .header("hibp-api-key", api_key);

        match send_json(Provider::EmailHibp, request).await? {
            JsonReply::Found(payload) => Ok(normalize_breaches(&email, &payload)),
            JsonReply::NotFound => Ok(vec![no_breaches(&email)]),
        }
    }
}

fn no_breaches(email: &str) -> SearchItem {
    SearchItem::not_found(Provider::EmailHibp, "Nenhum vazamento encontrado")
        .with_description(format!("{email} não aparece em vazamentos conhecidos"))
}

/// Map a breach list to one item per breach.
#[must_use]
pub fn normalize_breaches(email: &str, payload: &Value) -> Vec<SearchItem> {
    let Some(breaches) = payload.as_array().filter(|b| !b.is_empty()) else {
        return vec![no_breaches(email)];
    };

    breaches
        .iter()
        .map(|breach| {
            let title = first_str(breach, &[&["Title"], &["Name"]])
                .unwrap_or_else(|| "Breach".to_string());
            let date = pick_str(breach, &["BreachDate"]);
            let domain = pick_str(breach, &["Domain"]);
            let summary = pick_str(breach, &["Description"])
                .map(|d| truncate_chars(&strip_html(&d), SUMMARY_CHARS));

            let mut description = format!(
                "Data: {} · {}",
                date.as_deref().unwrap_or("?"),
                domain.as_deref().unwrap_or("?")
            );
            if let Some(summary) = summary {
                description = format!("{description} · {summary}");
            }

            let mut item = SearchItem::new(Provider::EmailHibp)
                .with_title(title)
                .with_description(description);
            if let Some(domain) = domain {
                item = item.with_url(format!("https://{domain}"));
            }
            if let Some(name) = pick_str(breach, &["Name"]) {
                item = item.with_attr("breach", name);
            }
            if let Some(date) = date {
                item = item.with_attr("date", date);
            }
            item
        })
        .collect()
}
