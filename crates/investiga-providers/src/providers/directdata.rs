//! Generic people-data vendor ("Direct Data").
//!
//! The vendor is reached through a configurable base URL and auth header.
//! The endpoint is chosen from the subject field being searched, or from the
//! shape of the query when no field is given.

use super::common::{first_array, first_str, send_json, JsonReply, KeyPath};
use crate::error::{ProviderError, Result};
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents::{self, only_digits};
use investiga_core::{Provider, ProvidersConfig, SearchItem, SubjectField};
use reqwest::Client;
use serde_json::Value;

const TITLE_PATHS: &[KeyPath<'static>] = &[&["title"], &["name"], &["full_name"], &["heading"]];
const DESCRIPTION_PATHS: &[KeyPath<'static>] = &[
    &["snippet"],
    &["description"],
    &["summary"],
    &["bio"],
    &["headline"],
];
const URL_PATHS: &[KeyPath<'static>] = &[&["url"], &["link"], &["linkedin_url"], &["website"]];
const LIST_PATHS: &[KeyPath<'static>] = &[&["items"], &["results"], &["data"]];

/// Vendor endpoint for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectDataMethod {
    /// `/email`
    Email,
    /// `/phone`
    Phone,
    /// `/name`
    Name,
    /// `/document` (CPF, CNPJ, RG)
    Document,
    /// `/search` (anything else)
    Search,
}

impl DirectDataMethod {
    /// Pick the endpoint from the searched field, falling back to query shape.
    #[must_use]
    pub fn select(query: &str, field: Option<SubjectField>) -> Self {
        match field {
            Some(SubjectField::Email) => Self::Email,
            Some(SubjectField::Celular) => Self::Phone,
            Some(SubjectField::Nome) => Self::Name,
            Some(SubjectField::Cpf | SubjectField::Cnpj | SubjectField::Rg) => Self::Document,
            Some(SubjectField::Cep) => Self::Search,
            None => Self::from_shape(query),
        }
    }

    fn from_shape(query: &str) -> Self {
        if documents::is_valid_email(query) {
            return Self::Email;
        }
        let digits = only_digits(query);
        let mostly_digits = !query.chars().any(char::is_alphabetic);
        if mostly_digits && !digits.is_empty() {
            return match digits.len() {
                11 if documents::is_valid_cpf(&digits) => Self::Document,
                14 => Self::Document,
                10..=13 => Self::Phone,
                _ => Self::Search,
            };
        }
        if query.split_whitespace().count() >= 2 {
            Self::Name
        } else {
            Self::Search
        }
    }

    /// Path segment of the endpoint.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Name => "name",
            Self::Document => "document",
            Self::Search => "search",
        }
    }

    /// Query value sent to the endpoint.
    #[must_use]
    pub fn prepare_query(self, query: &str) -> String {
        match self {
            Self::Email => documents::normalize_email(query),
            Self::Phone => documents::phone_digits(query).unwrap_or_else(|| only_digits(query)),
            Self::Document => only_digits(query),
            Self::Name | Self::Search => query.trim().to_string(),
        }
    }
}

/// Direct Data provider.
#[derive(Debug, Clone)]
pub struct DirectDataProvider {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
    auth_header: String,
    auth_scheme: Option<String>,
}

impl DirectDataProvider {
    /// Create a provider from the configured endpoint and credentials.
    #[must_use]
    pub fn new(client: Client, config: &ProvidersConfig) -> Self {
        Self {
            client,
            base_url: config
                .direct_data_base_url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            api_key: config.direct_data_api_key.clone(),
            auth_header: config.direct_data_auth_header.clone(),
            auth_scheme: config.direct_data_auth_scheme.clone(),
        }
    }

    fn auth_value(&self, key: &str) -> String {
        if self.auth_header.eq_ignore_ascii_case("authorization") {
            match self.auth_scheme.as_deref().map(str::trim) {
                Some(scheme) if !scheme.is_empty() => format!("{scheme} {key}"),
                _ => key.to_string(),
            }
        } else {
            key.to_string()
        }
    }
}

#[async_trait]
impl LookupProvider for DirectDataProvider {
    fn provider(&self) -> Provider {
        Provider::DirectData
    }

    async fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<SearchItem>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                provider: Provider::DirectData,
                missing: "base url",
            })?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured {
                provider: Provider::DirectData,
                missing: "api key",
            })?;

        let method = DirectDataMethod::select(query, options.field);
        let value = method.prepare_query(query);
        tracing::debug!(method = method.path(), "querying Direct Data");

        let limit = options.max_items.to_string();
        let request = self
            .client
            .get(format!("{base_url}/{}", method.path()))
            .query(&[("q", value.as_str()), ("limit", limit.as_str())])
            .header(self.auth_header.as_str(), self.auth_value(api_key));

        match send_json(Provider::DirectData, request).await? {
            JsonReply::Found(payload) => {
                Ok(normalize_directdata(query, &payload, options.max_items))
            }
            JsonReply::NotFound => Ok(vec![SearchItem::not_found(
                Provider::DirectData,
                "Nenhum registro encontrado",
            )]),
        }
    }
}

/// Map a vendor payload to at most `max_items` items.
///
/// Records come from a top-level array, from `items`, `results` or `data`,
/// or the payload itself when it is a single object.
#[must_use]
pub fn normalize_directdata(query: &str, payload: &Value, max_items: usize) -> Vec<SearchItem> {
    let records: Vec<&Value> = if let Some(list) = payload.as_array() {
        list.iter().collect()
    } else if let Some(list) = first_array(payload, LIST_PATHS) {
        list.iter().collect()
    } else if let Some(data) = payload.get("data").filter(|d| d.is_object()) {
        vec![data]
    } else if payload.is_object() {
        vec![payload]
    } else {
        Vec::new()
    };

    records
        .into_iter()
        .take(max_items)
        .map(|record| record_item(query, record))
        .collect()
}

fn record_item(query: &str, record: &Value) -> SearchItem {
    let item = SearchItem::new(Provider::DirectData);
    match record {
        Value::Object(_) => item
            .with_title(first_str(record, TITLE_PATHS).unwrap_or_else(|| query.trim().to_string()))
            .with_description(first_str(record, DESCRIPTION_PATHS).unwrap_or_default())
            .with_url(first_str(record, URL_PATHS).unwrap_or_default())
            .with_raw(record.clone()),
        Value::String(s) => item.with_title(s.clone()).with_raw(record.clone()),
        other => item
            .with_title(query.trim().to_string())
            .with_raw(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_from_field() {
        assert_eq!(
            DirectDataMethod::select("11987654321", Some(SubjectField::Celular)),
            DirectDataMethod::Phone
        );
        assert_eq!(
            DirectDataMethod::select("11987654321", Some(SubjectField::Cpf)),
            DirectDataMethod::Document
        );
        assert_eq!(
            DirectDataMethod::select("Maria", Some(SubjectField::Nome)),
            DirectDataMethod::Name
        );
    }

    #[test]
    fn test_method_from_query_shape() {
        assert_eq!(
            DirectDataMethod::select("a@b.com", None),
            DirectDataMethod::Email
        );
        assert_eq!(
            DirectDataMethod::select("529.982.247-25", None),
            DirectDataMethod::Document
        );
        assert_eq!(
            DirectDataMethod::select("(11) 98765-4321", None),
            DirectDataMethod::Phone
        );
        assert_eq!(
            DirectDataMethod::select("Heitor Nogueira Prado", None),
            DirectDataMethod::Name
        );
        assert_eq!(
            DirectDataMethod::select("acme", None),
            DirectDataMethod::Search
        );
    }

    #[test]
    fn test_prepare_query() {
        assert_eq!(
            DirectDataMethod::Phone.prepare_query("+55 11 98765-4321"),
            "11987654321"
        );
        assert_eq!(
            DirectDataMethod::Document.prepare_query("529.982.247-25"),
            "52998224725"
        );
    }

    #[test]
    fn test_normalize_results_list_with_fallbacks() {
        let payload = json!({"results": [
            {"full_name": "Heitor Prado", "bio": "Engenheiro", "linkedin_url": "https://linkedin.com/in/hp"},
            {"heading": "Registro 2", "summary": "Resumo"},
            {"cpf": "52998224725"}
        ]});
        let items = normalize_directdata("heitor", &payload, 5);
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title.as_deref(), Some("Heitor Prado"));
        assert_eq!(items[0].description.as_deref(), Some("Engenheiro"));
        assert_eq!(items[0].url.as_deref(), Some("https://linkedin.com/in/hp"));
        assert_eq!(items[1].title.as_deref(), Some("Registro 2"));
        assert_eq!(items[2].title.as_deref(), Some("heitor"));
        assert_eq!(items[2].raw, Some(json!({"cpf": "52998224725"})));
    }

    #[test]
    fn test_normalize_respects_limit_and_shapes() {
        let list: Vec<Value> = (0..8).map(|i| json!({"title": format!("r{i}")})).collect();
        assert_eq!(normalize_directdata("q", &Value::Array(list), 5).len(), 5);

        let single = json!({"data": {"name": "Único"}});
        let items = normalize_directdata("q", &single, 5);
        assert_eq!(items[0].title.as_deref(), Some("Único"));

        let object = json!({"title": "Objeto"});
        assert_eq!(
            normalize_directdata("q", &object, 5)[0].title.as_deref(),
            Some("Objeto")
        );
        assert!(normalize_directdata("q", &json!(null), 5).is_empty());
    }

    #[test]
    fn test_auth_value() {
        let mut config = ProvidersConfig {
            direct_data_auth_header: "Authorization".to_string(),
            ..ProvidersConfig::default()
        };
        let provider = DirectDataProvider::new(Client::new(), &config);
        assert_eq!(provider.auth_value("k"), "k");

        config.direct_data_auth_scheme = Some("  ".to_string());
        let provider = DirectDataProvider::new(Client::new(), &config);
        assert_eq!(provider.auth_value("k"), "k");

        config.direct_data_auth_scheme = Some("Token".to_string());
        let provider = DirectDataProvider::new(Client::new(), &config);
        assert_eq!(provider.auth_value("k"), "Token k");

        let provider = DirectDataProvider::new(Client::new(), &ProvidersConfig::default());
        assert_eq!(provider.auth_value("k"), "k");
    }

    #[tokio::test]
    async fn test_not_configured() {
        let provider = DirectDataProvider::new(Client::new(), &ProvidersConfig::default());
        let err = provider
            .lookup("x", &LookupOptions::default())
            .await
            .expect_err("missing config");
        assert_eq!(
            err.sentinel_message(Provider::DirectData),
            "Direct Data não configurado"
        );
    }
}
