//! Address lookup by CEP through ViaCEP.

use super::common::{join_present, pick_str, send_json, JsonReply};
use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents;
use investiga_core::{Provider, SearchItem};
use reqwest::Client;
use serde_json::Value;

const DEFAULT_BASE_URL: &str = "https://viacep.com.br";

/// ViaCEP provider.
#[derive(Debug, Clone)]
pub struct CepProvider {
    client: Client,
    base_url: String,
}

impl CepProvider {
    /// Create a provider against the public ViaCEP endpoint.
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
impl LookupProvider for CepProvider {
    fn provider(&self) -> Provider {
        Provider::Cep
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        let Some(cep) = documents::normalize_cep(query) else {
            return Ok(Vec::new());
        };

        let request = self
            .client
            .get(format!("{}/ws/{cep}/json/", self.base_url));
        match send_json(Provider::Cep, request).await? {
            JsonReply::Found(payload) => Ok(normalize_viacep(&cep, &payload)),
            JsonReply::NotFound => Ok(vec![not_found(&cep)]),
        }
    }
}

/// Map a ViaCEP payload to a single address item or a not-found sentinel.
#[must_use]
pub fn normalize_viacep(cep: &str, payload: &Value) -> Vec<SearchItem> {
    let flagged = match payload.get("erro") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };
    if flagged || !payload.is_object() {
        return vec![not_found(cep)];
    }

    let city = match (pick_str(payload, &["localidade"]), pick_str(payload, &["uf"])) {
        (Some(city), Some(uf)) => Some(format!("{city}-{uf}")),
        (city, uf) => city.or(uf),
    };
    let description = join_present(
        [
            pick_str(payload, &["logradouro"]),
            pick_str(payload, &["bairro"]),
            city,
        ],
        ", ",
    );

    let mut item = SearchItem::new(Provider::Cep)
        .with_title("Endereço encontrado")
        .with_description(description)
        .with_url(format!("https://viacep.com.br/ws/{cep}/json/"))
        .with_attr(
            "cep",
            pick_str(payload, &["cep"]).unwrap_or_else(|| cep.to_string()),
        )
        .with_raw(payload.clone());
    for key in ["ibge", "ddd"] {
        if let Some(value) = pick_str(payload, &[key]) {
            item = item.with_attr(key, value);
        }
    }
    vec![item]
}

fn not_found(cep: &str) -> SearchItem {
    SearchItem::not_found(Provider::Cep, "CEP não encontrado")
        .with_description(format!("CEP {cep} não localizado na base ViaCEP"))
        .with_url(format!("https://viacep.com.br/ws/{cep}/json/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_found() {
        let payload = json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "ibge": "3550308",
            "ddd": "11"
        });
        let items = normalize_viacep("01001000", &payload);
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title.as_deref(), Some("Endereço encontrado"));
        assert_eq!(
            item.description.as_deref(),
            Some("Praça da Sé, Sé, São Paulo-SP")
        );
        assert_eq!(item.attr_str("cep"), Some("01001-000"));
        assert_eq!(item.attr_str("ibge"), Some("3550308"));
        assert_eq!(item.raw.as_ref(), Some(&payload));
        assert!(!item.is_not_found());
    }

    #[test]
    fn test_erro_flag_yields_single_sentinel() {
        for payload in [json!({"erro": true}), json!({"erro": "true"})] {
            let items = normalize_viacep("01001000", &payload);
            assert_eq!(items.len(), 1);
            let item = &items[0];
            assert_eq!(item.title.as_deref(), Some("CEP não encontrado"));
            assert!(item.is_not_found());
            assert!(item.attr("valid").is_none());
            assert!(item.attr("ibge").is_none());
            assert!(item.raw.is_none());
        }
    }
}
