//! Providers that answer locally: CPF and PIS/NIT check digits and phone
//! number classification.

use crate::error::Result;
use crate::provider::{LookupOptions, LookupProvider};
use async_trait::async_trait;
use investiga_core::documents::{self, only_digits};
use investiga_core::{Provider, SearchItem};

const CPF_VALIDATION_URL: &str = "https://www.gov.br/pt-br/servicos/validacao-de-documentos";

/// CPF check-digit validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpfProvider;

#[async_trait]
impl LookupProvider for CpfProvider {
    fn provider(&self) -> Provider {
        Provider::Cpf
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        Ok(normalize_cpf(query))
    }
}

/// One validity item for an 11-digit CPF, nothing otherwise.
#[must_use]
pub fn normalize_cpf(query: &str) -> Vec<SearchItem> {
    let digits = only_digits(query);
    let Some(formatted) = documents::format_cpf(&digits) else {
        return Vec::new();
    };
    let valid = documents::is_valid_cpf(&digits);

    let (title, description) = if valid {
        (
            "CPF válido",
            format!("CPF {formatted} válido conforme dígitos verificadores."),
        )
    } else {
        (
            "CPF inválido",
            format!("CPF {formatted} inválido (dígitos verificadores não conferem)."),
        )
    };

    vec![SearchItem::new(Provider::Cpf)
        .with_title(title)
        .with_description(description)
        .with_url(CPF_VALIDATION_URL)
        .with_attr("cpf", formatted)
        .with_attr("digits", digits)
        .with_attr("valid", valid)]
}

/// PIS/PASEP/NIT check-digit validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CltPisProvider;

#[async_trait]
impl LookupProvider for CltPisProvider {
    fn provider(&self) -> Provider {
        Provider::CltPis
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        Ok(normalize_pis(query))
    }
}

/// One validity item for an 11-digit PIS, nothing otherwise.
#[must_use]
pub fn normalize_pis(query: &str) -> Vec<SearchItem> {
    let Some(formatted) = documents::format_pis(query) else {
        return Vec::new();
    };
    let valid = documents::is_valid_pis(query);
    let (title, verdict) = if valid {
        ("PIS/NIT válido", "válido")
    } else {
        ("PIS/NIT inválido", "inválido")
    };

    vec![SearchItem::new(Provider::CltPis)
        .with_title(title)
        .with_description(format!("CLT {formatted} {verdict}."))
        .with_attr("pis", formatted)
        .with_attr("valid", valid)]
}

/// Brazilian phone formatting and mobile/landline classification.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneProvider;

#[async_trait]
impl LookupProvider for PhoneProvider {
    fn provider(&self) -> Provider {
        Provider::Phone
    }

    async fn lookup(&self, query: &str, _options: &LookupOptions) -> Result<Vec<SearchItem>> {
        Ok(normalize_phone(query))
    }
}

/// One item describing a 10 or 11 digit number, nothing otherwise.
#[must_use]
pub fn normalize_phone(query: &str) -> Vec<SearchItem> {
    let Some(info) = documents::parse_phone(query) else {
        return Vec::new();
    };

    vec![SearchItem::new(Provider::Phone)
        .with_title("Telefone formatado")
        .with_description(format!("{} · {}", info.formatted, info.kind))
        .with_url(format!("tel:{}", info.e164))
        .with_attr("phone", info.digits)
        .with_attr("ddd", info.ddd)
        .with_attr("e164", info.e164)
        .with_attr("line_type", info.kind.as_str())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cpf_valid() {
        let items = normalize_cpf("123.456.789-09");
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.title.as_deref(), Some("CPF válido"));
        assert_eq!(
            item.description.as_deref(),
            Some("CPF 123.456.789-09 válido conforme dígitos verificadores.")
        );
        assert_eq!(item.attr_str("cpf"), Some("123.456.789-09"));
        assert_eq!(item.attr("valid"), Some(&json!(true)));
    }

    #[test]
    fn test_cpf_invalid_and_malformed() {
        let items = normalize_cpf("12345678900");
        assert_eq!(items[0].title.as_deref(), Some("CPF inválido"));
        assert_eq!(items[0].attr("valid"), Some(&json!(false)));

        assert!(normalize_cpf("1234").is_empty());
        assert!(normalize_cpf("").is_empty());
    }

    #[test]
    fn test_pis() {
        let items = normalize_pis("12045698116");
        assert_eq!(items[0].title.as_deref(), Some("PIS/NIT válido"));
        assert_eq!(
            items[0].description.as_deref(),
            Some("CLT 120.45698.11-6 válido.")
        );
        assert_eq!(items[0].source, Provider::CltPis);
        assert!(normalize_pis("123").is_empty());
    }

    #[test]
    fn test_phone_mobile() {
        let items = normalize_phone("11987654321");
        let item = &items[0];
        assert_eq!(item.attr_str("ddd"), Some("11"));
        assert_eq!(item.attr_str("line_type"), Some("Celular"));
        assert_eq!(
            item.description.as_deref(),
            Some("(11) 98765-4321 · Celular")
        );
        assert_eq!(item.url.as_deref(), Some("tel:+5511987654321"));
    }

    #[test]
    fn test_phone_landline() {
        let items = normalize_phone("1133334444");
        assert_eq!(items[0].attr_str("ddd"), Some("11"));
        assert_eq!(items[0].attr_str("line_type"), Some("Fixo"));
        assert!(normalize_phone("4444").is_empty());
    }

    #[test]
    fn test_phone_with_country_code_is_malformed() {
        assert!(normalize_phone("5511987654321").is_empty());
    }

    #[tokio::test]
    async fn test_local_providers_never_fail() {
        let options = LookupOptions::default();
        assert!(CpfProvider.lookup("abc", &options).await.expect("cpf").is_empty());
        assert_eq!(
            PhoneProvider
                .lookup("(11) 3333-4444", &options)
                .await
                .expect("phone")
                .len(),
            1
        );
    }
}
