//! Court records through the CNJ Datajud public API.

use super::common::{first_str, pick, pick_str, send_json, JsonReply};
use crate::error::{ProviderError, Result};
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents::only_digits;
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::{json, Value};

const DEFAULT_BASE_URL: &str = "https://api-publica.datajud.cnj.jus.br";
const PROCESS_NUMBER_DIGITS: usize = 20;

/// Datajud provider for one tribunal index.
#[derive(Debug, Clone)]
pub struct DatajudProvider {
    client: Client,
    base_url: String,
    tribunal: String,
    api_key: Option<String>,
}

impl DatajudProvider {
    /// Create a provider against the public Datajud endpoint.
    #[must_use]
    pub fn new(client: Client, tribunal: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL, tribunal, api_key)
    }

    /// Create a provider against a custom endpoint.
    #[must_use]
    pub fn with_base_url(
        client: Client,
        base_url: impl Into<String>,
        tribunal: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tribunal: tribunal.into(),
            api_key,
        }
    }
}

/// Elasticsearch body: process number lookup for 20-digit queries, party
/// name phrase match otherwise.
#[must_use]
pub fn search_body(query: &str, size: usize) -> Value {
    let digits = only_digits(query);
    let is_process_number =
        digits.len() == PROCESS_NUMBER_DIGITS && !query.chars().any(char::is_alphabetic);
    let clause = if is_process_number {
        json!({"match": {"numeroProcesso": digits}})
    } else {
        json!({"match_phrase": {"partes.nome": query.trim()}})
    };
    json!({"size": size, "query": clause})
}

#[async_trait]
impl LookupProvider for DatajudProvider {
    fn provider(&self) -> Provider {
        Provider::Datajud
    }

    async fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<SearchItem>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                provider: Provider::Datajud,
                missing: "api key",
            })?;

        let request = self
            .client
            .post(format!("{}/api_publica_{}/_search", self.base_url, self.tribunal))
            .header("Authorization", format!("APIKey {api_key}"))
            .json(&search_body(query, options.max_items));

        match send_json(Provider::Datajud, request).await? {
            JsonReply::Found(payload) => Ok(normalize_hits(&payload, options.max_items)),
            JsonReply::NotFound => Ok(Vec::new()),
        }
    }
}

/// Map Elasticsearch hits (`hits.hits[]._source`) to one item per process.
#[must_use]
pub fn normalize_hits(payload: &Value, max_items: usize) -> Vec<SearchItem> {
    let Some(hits) = pick(payload, &["hits", "hits"]).and_then(Value::as_array) else {
        return Vec::new();
    };

    hits.iter()
        .filter_map(|hit| hit.get("_source"))
        .take(max_items)
        .map(|source| {
            let numero = pick_str(source, &["numeroProcesso"]);
            let tribunal = pick_str(source, &["tribunal"]);
            let title = numero
                .as_ref()
                .map_or_else(|| "Processo".to_string(), |n| format!("Processo {n}"));
            let description = [
                pick_str(source, &["classe", "nome"]),
                pick_str(source, &["orgaoJulgador", "nome"]),
                tribunal.clone(),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" · ");

            let partes: Vec<String> = source
                .get("partes")
                .and_then(Value::as_array)
                .map(|partes| {
                    partes
                        .iter()
                        .filter_map(|p| match p {
                            Value::String(s) => Some(s.clone()),
                            other => first_str(other, &[&["nome"], &["name"]]),
                        })
                        .collect()
                })
                .unwrap_or_default();

            let mut item = SearchItem::new(Provider::Datajud)
                .with_title(title)
                .with_description(description)
                .with_raw(source.clone());
            if let Some(numero) = numero {
                item = item.with_attr("numero", numero);
            }
            if let Some(tribunal) = tribunal {
                item = item.with_attr("tribunal", tribunal);
            }
            if let Some(date) = pick_str(source, &["dataAjuizamento"]) {
                item = item.with_attr("date", date);
            }
            if !partes.is_empty() {
                item = item.with_attr("partes", partes);
            }
            item
        })
        .collect()
}
