//! CNPJ validation and company lookup through the CNPJa open API.

use super::common::{first_str, join_present, pick_str, send_json, JsonReply};
use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents::{self, only_digits};
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://open.cnpja.com";

/// CNPJa provider.
#[derive(Debug, Clone)]
pub struct CnpjProvider {
    client: Client,
    base_url: String,
}

impl CnpjProvider {
    /// Create a provider against the public CNPJa endpoint.
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
impl LookupProvider for CnpjProvider {
    fn provider(&self) -> Provider {
        Provider::Cnpj
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let digits = only_digits(query);
        let Some(formatted) = documents::format_cnpj(&digits) else {
            return Ok(Vec::new());
        };
        if !documents::is_valid_cnpj(&digits) {
            return Ok(vec![invalid(&formatted)]);
        }

        let request = self
            .client
            .get(format!("{}/office/{digits}", self.base_url));
        match send_json(Provider::Cnpj, request).await? {
            JsonReply::Found(payload) => Ok(normalize_cnpja(&digits, &payload)),
            JsonReply::NotFound => Ok(vec![SearchItem::not_found(
                Provider::Cnpj,
                "CNPJ não encontrado",
            )
            .with_description(format!("CNPJ {formatted} não localizado na base CNPJa"))
            .with_attr("cnpj", formatted)]),
        }
    }
}

fn invalid(formatted: &str) -> SearchItem {
    SearchItem::new(Provider::Cnpj)
        .with_title("CNPJ inválido")
        .with_description(format!(
            "CNPJ {formatted} inválido (dígitos verificadores não conferem)."
        ))
        .with_attr("cnpj", formatted)
        .with_attr("valid", false)
}

/// Map a CNPJa office payload to a company item.
#[must_use]
pub fn normalize_cnpja(digits: &str, payload: &Value) -> Vec<SearchItem> {
    let formatted = documents::format_cnpj(digits).unwrap_or_else(|| digits.to_string());
    let title = first_str(payload, &[&["company", "name"], &["alias"]])
        .unwrap_or_else(|| format!("CNPJ {formatted}"));

    let address = payload.get("address").map(|address| {
        let city = match (pick_str(address, &["city"]), pick_str(address, &["state"])) {
            (Some(city), Some(state)) => Some(format!("{city}-{state}")),
            (city, state) => city.or(state),
        };
        join_present(
            [
                pick_str(address, &["street"]),
                pick_str(address, &["number"]),
                pick_str(address, &["district"]),
                city,
            ],
            ", ",
        )
    });

    let description = join_present(
        [
            pick_str(payload, &["alias"]),
            pick_str(payload, &["status", "text"]),
            pick_str(payload, &["founded"]).map(|d| format!("Abertura: {d}")),
            pick_str(payload, &["mainActivity", "text"]),
            address,
        ],
        " · ",
    );

    let mut item = SearchItem::new(Provider::Cnpj)
        .with_title(title)
        .with_description(description)
        .with_url(format!("https://cnpja.com/office/{digits}"))
        .with_attr("cnpj", formatted)
        .with_attr("valid", true)
        .with_raw(payload.clone());
    if let Some(status) = pick_str(payload, &["status", "text"]) {
        item = item.with_attr("status", status);
    }
    if let Some(founded) = pick_str(payload, &["founded"]) {
        item = item.with_attr("date", founded);
    }
    vec![item]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_company_payload() {
        let payload = json!({
            "taxId": "11222333000181",
            "alias": "Padaria Central",
            "founded": "2001-05-10",
            "status": {"id": 2, "text": "Ativa"},
            "company": {"name": "PADARIA CENTRAL LTDA", "members": []},
            "mainActivity": {"id": 1091102, "text": "Fabricação de produtos de padaria"},
            "address": {
                "street": "Avenida Paulista",
                "number": "1000",
                "district": "Bela Vista",
                "city": "São Paulo",
                "state": "SP",
                "zip": "01310100"
            }
        });

        let items = normalize_cnpja("11222333000181", &payload);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title.as_deref(), Some("PADARIA CENTRAL LTDA"));
        assert_eq!(
            item.description.as_deref(),
            Some(
                "Padaria Central · Ativa · Abertura: 2001-05-10 · Fabricação de produtos de padaria · Avenida Paulista, 1000, Bela Vista, São Paulo-SP"
            )
        );
        assert_eq!(item.attr_str("cnpj"), Some("11.222.333/0001-81"));
        assert_eq!(item.attr_str("status"), Some("Ativa"));
        assert_eq!(
            item.url.as_deref(),
            Some("https://cnpja.com/office/11222333000181")
        );
    }

    #[test]
    fn test_sparse_payload_falls_back_to_formatted_cnpj() {
        let items = normalize_cnpja("11222333000181", &json!({}));
        assert_eq!(items[0].title.as_deref(), Some("CNPJ 11.222.333/0001-81"));
        assert!(items[0].description.is_none());
    }

    #[test]
    fn test_invalid_item() {
        let item = invalid("11.222.333/0001-80");
        assert_eq!(item.title.as_deref(), Some("CNPJ inválido"));
        assert_eq!(item.attr("valid"), Some(&json!(false)));
    }
}
