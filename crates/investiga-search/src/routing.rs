//! Which providers answer which subject field, and with what query.

use investiga_core::documents::{self, only_digits};
use investiga_core::{Provider, SearchConfig, SubjectField};
use investiga_cross::{is_generic_name, title_case};

/// Suffix that narrows web queries to government domains.
pub const GOVERNMENT_SITES: &str = " site:gov.br OR site:jus.br OR site:mp.br";

/// Providers consulted for a field, filtered by the enabled-provider list.
///
/// `value` matters only for `nome`: generic names skip the web providers
/// unless `force_generic_providers` is set.
#[must_use]
pub fn providers_for_field(
    field: SubjectField,
    value: &str,
    config: &SearchConfig,
) -> Vec<Provider> {
    let mut providers = match field {
        SubjectField::Cpf => {
            let mut list = vec![Provider::Cpf, Provider::DirectData];
            if config.force_duckduckgo_for_cpf {
                list.push(Provider::DuckDuckGo);
            }
            list
        }
        SubjectField::Cnpj => {
            let mut list = vec![Provider::Cnpj, Provider::DirectData];
            if config.force_duckduckgo_for_cnpj {
                list.push(Provider::DuckDuckGo);
            }
            list
        }
        SubjectField::Cep => vec![Provider::Cep],
        SubjectField::Celular => vec![Provider::Phone, Provider::DddBrasilApi, Provider::DirectData],
        SubjectField::Rg => vec![Provider::DirectData, Provider::DuckDuckGo],
        SubjectField::Nome => {
            let mut list = vec![Provider::Datajud];
            if config.force_generic_providers || !is_generic_name(value) {
                list.extend([Provider::DuckDuckGo, Provider::Wikipedia]);
            }
            list
        }
        SubjectField::Email => vec![Provider::EmailHibp, Provider::DirectData],
    };
    providers.retain(|p| config.is_enabled(*p));
    providers
}

/// Canonical query for a field: `nome`/`rg` trimmed, `email` lower-cased,
/// everything else reduced to digits. `None` when nothing is left.
#[must_use]
pub fn normalize_field_value(field: SubjectField, value: &str) -> Option<String> {
    let normalized = match field {
        SubjectField::Nome | SubjectField::Rg => value.trim().to_string(),
        SubjectField::Email => documents::normalize_email(value),
        SubjectField::Cpf | SubjectField::Cnpj | SubjectField::Cep | SubjectField::Celular => {
            only_digits(value)
        }
    };
    (!normalized.is_empty()).then_some(normalized)
}

/// Quoted DuckDuckGo query for identifier and name fields.
#[must_use]
pub fn duckduckgo_query(field: SubjectField, value: &str, refine: bool) -> String {
    let base = match field {
        SubjectField::Cpf => format!(
            "CPF {}",
            documents::format_cpf(value).unwrap_or_else(|| value.to_string())
        ),
        SubjectField::Cnpj => format!(
            "CNPJ {}",
            documents::format_cnpj(value).unwrap_or_else(|| value.to_string())
        ),
        SubjectField::Nome => title_case(value),
        SubjectField::Rg => format!("RG {value}"),
        SubjectField::Cep | SubjectField::Celular | SubjectField::Email => {
            return value.to_string();
        }
    };
    let suffix = if refine { GOVERNMENT_SITES } else { "" };
    format!("\"{base}\"{suffix}")
}

/// Query sent to one provider for a normalized field value.
#[must_use]
pub fn provider_query(
    field: SubjectField,
    provider: Provider,
    value: &str,
    config: &SearchConfig,
) -> String {
    if provider == Provider::DuckDuckGo {
        duckduckgo_query(field, value, config.refine_duckduckgo)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routing() {
        let config = SearchConfig::default();
        assert_eq!(
            providers_for_field(SubjectField::Cpf, "52998224725", &config),
            vec![Provider::Cpf, Provider::DirectData]
        );
        assert_eq!(
            providers_for_field(SubjectField::Celular, "11987654321", &config),
            vec![Provider::Phone, Provider::DddBrasilApi, Provider::DirectData]
        );
        assert_eq!(
            providers_for_field(SubjectField::Email, "a@b.com", &config),
            vec![Provider::EmailHibp, Provider::DirectData]
        );
        assert_eq!(
            providers_for_field(SubjectField::Cep, "01001000", &config),
            vec![Provider::Cep]
        );
    }

    #[test]
    fn test_forced_duckduckgo() {
        let config = SearchConfig {
            force_duckduckgo_for_cnpj: true,
            ..SearchConfig::default()
        };
        assert!(providers_for_field(SubjectField::Cnpj, "11222333000181", &config)
            .contains(&Provider::DuckDuckGo));
        assert!(!providers_for_field(SubjectField::Cpf, "52998224725", &config)
            .contains(&Provider::DuckDuckGo));
    }

    #[test]
    fn test_generic_names_skip_web_providers() {
        let config = SearchConfig::default();
        assert_eq!(
            providers_for_field(SubjectField::Nome, "Maria Silva", &config),
            vec![Provider::Datajud]
        );
        assert_eq!(
            providers_for_field(SubjectField::Nome, "Heitor Nogueira Prado", &config),
            vec![Provider::Datajud, Provider::DuckDuckGo, Provider::Wikipedia]
        );

        let forced = SearchConfig {
            force_generic_providers: true,
            ..SearchConfig::default()
        };
        assert_eq!(
            providers_for_field(SubjectField::Nome, "Maria Silva", &forced).len(),
            3
        );
    }

    #[test]
    fn test_disabled_providers_are_dropped() {
        let config = SearchConfig {
            enabled_providers: vec![Provider::Cpf],
            ..SearchConfig::default()
        };
        assert_eq!(
            providers_for_field(SubjectField::Cpf, "52998224725", &config),
            vec![Provider::Cpf]
        );
        assert!(providers_for_field(SubjectField::Rg, "1234", &config).is_empty());
    }

    #[test]
    fn test_normalize_field_value() {
        assert_eq!(
            normalize_field_value(SubjectField::Cpf, "529.982.247-25").as_deref(),
            Some("52998224725")
        );
        assert_eq!(
            normalize_field_value(SubjectField::Email, " Ana@Exemplo.COM ").as_deref(),
            Some("ana@exemplo.com")
        );
        assert_eq!(
            normalize_field_value(SubjectField::Rg, " 12.345.678-9 ").as_deref(),
            Some("12.345.678-9")
        );
        assert!(normalize_field_value(SubjectField::Cep, "abc").is_none());
    }

    #[test]
    fn test_duckduckgo_queries() {
        assert_eq!(
            duckduckgo_query(SubjectField::Cpf, "12345678909", false),
            "\"CPF 123.456.789-09\""
        );
        assert_eq!(
            duckduckgo_query(SubjectField::Cnpj, "11222333000181", true),
            "\"CNPJ 11.222.333/0001-81\" site:gov.br OR site:jus.br OR site:mp.br"
        );
        assert_eq!(
            duckduckgo_query(SubjectField::Nome, "heitor nogueira prado", false),
            "\"Heitor Nogueira Prado\""
        );
        assert_eq!(
            duckduckgo_query(SubjectField::Rg, "1234", false),
            "\"RG 1234\""
        );
    }

    #[test]
    fn test_provider_query_only_rewrites_duckduckgo() {
        let config = SearchConfig::default();
        assert_eq!(
            provider_query(SubjectField::Cpf, Provider::Cpf, "12345678909", &config),
            "12345678909"
        );
        assert_eq!(
            provider_query(SubjectField::Rg, Provider::DuckDuckGo, "1234", &config),
            "\"RG 1234\""
        );
    }
}
