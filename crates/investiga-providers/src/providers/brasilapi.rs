//! Area code (DDD) lookup through BrasilAPI.

use super::common::{pick, pick_str, send_json, JsonReply};
use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents::{only_digits, phone_digits};
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://brasilapi.com.br";
const CITIES_IN_DESCRIPTION: usize = 8;

/// BrasilAPI DDD provider.
#[derive(Debug, Clone)]
pub struct DddProvider {
    client: Client,
    base_url: String,
}

impl DddProvider {
    /// Create a provider against the public BrasilAPI endpoint.
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

/// Two-digit area code from either a bare DDD or a full phone number.
#[must_use]
pub fn ddd_from_query(query: &str) -> Option<String> {
    let digits = only_digits(query);
    if digits.len() == 2 {
        return Some(digits);
    }
    phone_digits(query).map(|d| d[..2].to_string())
}

#[async_trait]
impl LookupProvider for DddProvider {
    fn provider(&self) -> Provider {
        Provider::DddBrasilApi
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let Some(ddd) = ddd_from_query(query) else {
            return Ok(Vec::new());
        };

        let request = self
            .client
            .get(format!("{}/api/ddd/v1/{ddd}", self.base_url));
        match send_json(Provider::DddBrasilApi, request).await? {
            JsonReply::Found(payload) => Ok(normalize_ddd(&ddd, &payload)),
            JsonReply::NotFound => Ok(vec![SearchItem::not_found(
                Provider::DddBrasilApi,
                "DDD não encontrado",
            )
            .with_description(format!("DDD {ddd} não localizado na BrasilAPI"))
            .with_attr("ddd", ddd)]),
        }
    }
}

/// Map a BrasilAPI DDD payload (`{state, cities}`) to one item.
#[must_use]
pub fn normalize_ddd(ddd: &str, payload: &Value) -> Vec<SearchItem> {
    let state = pick_str(payload, &["state"]);
    let cities: Vec<String> = pick(payload, &["cities"])
        .and_then(Value::as_array)
        .map(|cities| {
            cities
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let title = match &state {
        Some(state) => format!("DDD {ddd} · {state}"),
        None => format!("DDD {ddd}"),
    };
    let mut description = cities
        .iter()
        .take(CITIES_IN_DESCRIPTION)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if cities.len() > CITIES_IN_DESCRIPTION {
        description.push_str(&format!(" e mais {}", cities.len() - CITIES_IN_DESCRIPTION));
    }

    let mut item = SearchItem::new(Provider::DddBrasilApi)
        .with_title(title)
        .with_description(description)
        .with_url(format!("https://brasilapi.com.br/api/ddd/v1/{ddd}"))
        .with_attr("ddd", ddd)
        .with_attr("cities", cities)
        .with_raw(payload.clone());
    if let Some(state) = state {
        item = item.with_attr("state", state);
    }
    vec![item]
}
