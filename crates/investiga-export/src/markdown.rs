//! Markdown dossier export.
//!
//! Layout: a title built from the subject, the generation time, a subject
//! summary, one `##` section per field with one `###` per provider, then the
//! cross-reference groups under "Cruzamentos".

use crate::dossier::{Dossier, ExportOptions};
use crate::error::Result;
use investiga_core::documents::{format_cep, format_cnpj, format_cpf};
use investiga_core::{SearchItem, SubjectField};
use investiga_cross::{title_case, CrossGroup, GroupTag, IdentifierKind};
use serde_json::Value;
use std::fmt::Write as _;

/// Subject fields in dossier order.
const SUBJECT_ORDER: [SubjectField; 7] = [
    SubjectField::Nome,
    SubjectField::Cpf,
    SubjectField::Cnpj,
    SubjectField::Celular,
    SubjectField::Cep,
    SubjectField::Rg,
    SubjectField::Email,
];

const DEFAULT_TITLE: &str = "Dossiê OSINT";

/// Render the dossier as Markdown.
///
/// # Errors
/// Returns error if writing to the output buffer fails.
pub fn to_markdown(dossier: &Dossier<'_>, options: &ExportOptions) -> Result<String> {
    let mut out = String::new();

    let title_parts: Vec<String> = SUBJECT_ORDER
        .iter()
        .filter_map(|&field| {
            dossier
                .subject
                .get(field)
                .map(|v| format!("{}: {v}", field.label()))
        })
        .collect();
    let title = if title_parts.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title_parts.join(" · ")
    };

    writeln!(out, "# {title}")?;
    writeln!(out)?;
    writeln!(out, "Gerado em {}", dossier.timestamp())?;
    writeln!(out)?;
    writeln!(out, "## Sumário do Sujeito")?;
    for field in SUBJECT_ORDER {
        let value = dossier.subject.get(field).unwrap_or("(não informado)");
        writeln!(out, "- {}: {value}", field.label())?;
    }
    writeln!(out)?;

    let results = dossier.selected_results(options);
    for field in results.fields() {
        writeln!(out, "## {}", field.label())?;
        for (provider, items) in results.field(field).into_iter().flatten() {
            writeln!(out, "### {}", provider.display_name())?;
            if items.is_empty() {
                writeln!(out, "- (sem itens)")?;
                continue;
            }
            for item in items {
                write_item(&mut out, item)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    write_groups(&mut out, &dossier.groups(options))?;
    Ok(out)
}

fn write_item(out: &mut String, item: &SearchItem) -> Result<()> {
    let title = item
        .title
        .as_deref()
        .or(item.description.as_deref())
        .unwrap_or("(sem título)");
    writeln!(out, "- {title}")?;
    if let Some(description) = &item.description {
        writeln!(out, "  - Nota: {description}")?;
    }
    if let Some(url) = &item.url {
        writeln!(out, "  - URL: {url}")?;
    }

    let extras: Vec<String> = item
        .extra
        .iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) if !s.is_empty() => Some(format!("{key}: {s}")),
            Value::Number(n) => Some(format!("{key}: {n}")),
            Value::Bool(b) => Some(format!("{key}: {b}")),
            _ => None,
        })
        .collect();
    if !extras.is_empty() {
        writeln!(out, "  - Extras: {}", extras.join("; "))?;
    }
    Ok(())
}

fn write_groups(out: &mut String, groups: &[&CrossGroup]) -> Result<()> {
    writeln!(out, "## Cruzamentos")?;
    if groups.is_empty() {
        writeln!(out, "- (nenhum cruzamento encontrado)")?;
        return Ok(());
    }
    for group in groups {
        let tag = match group.tag {
            Some(GroupTag::PersonCompany) => " (pessoa e empresa)",
            None => "",
        };
        writeln!(
            out,
            "### {}: {}{tag}",
            group.kind.label(),
            display_value(group.kind, &group.value)
        )?;
        for m in &group.matches {
            let title = m.title.as_deref().unwrap_or("(sem título)");
            writeln!(
                out,
                "- {} · {}: {title}",
                m.field.label(),
                m.provider.display_name()
            )?;
            if let Some(url) = &m.url {
                writeln!(out, "  - URL: {url}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn display_value(kind: IdentifierKind, value: &str) -> String {
    let formatted = match kind {
        IdentifierKind::Cpf => format_cpf(value),
        IdentifierKind::Cnpj => format_cnpj(value),
        IdentifierKind::Cep => format_cep(value),
        IdentifierKind::Name => Some(title_case(value)),
        IdentifierKind::Phone | IdentifierKind::Email => None,
    };
    formatted.unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use investiga_core::{CrossConfig, Provider, ResultSet, Subject};
    use investiga_cross::{cross_reference, CrossReport};

    fn render(subject: &Subject, results: &ResultSet, report: &CrossReport) -> String {
        let at = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid time");
        let dossier = Dossier::new(subject, results, report).generated_at(at);
        to_markdown(&dossier, &ExportOptions::default()).expect("markdown")
    }

    #[test]
    fn test_title_and_summary() {
        let subject = Subject::default()
            .with(SubjectField::Nome, "Heitor Prado")
            .with(SubjectField::Cpf, "123.456.789-09");
        let markdown = render(&subject, &ResultSet::new(), &CrossReport::default());

        assert!(markdown.starts_with("# NOME: Heitor Prado · CPF: 123.456.789-09\n"));
        assert!(markdown.contains("Gerado em 2024-05-01T12:00:00.000Z"));
        assert!(markdown.contains("- EMAIL: (não informado)"));
        assert!(markdown.contains("## Cruzamentos\n- (nenhum cruzamento encontrado)"));
    }

    #[test]
    fn test_empty_subject_uses_default_title() {
        let markdown = render(&Subject::default(), &ResultSet::new(), &CrossReport::default());
        assert!(markdown.starts_with("# Dossiê OSINT\n"));
    }

    #[test]
    fn test_sections_items_and_groups() {
        let subject = Subject::default().with(SubjectField::Cpf, "12345678909");
        let mut results = ResultSet::new();
        results.insert(
            SubjectField::Cpf,
            Provider::Cpf,
            vec![SearchItem::new(Provider::Cpf)
                .with_title("CPF válido")
                .with_description("CPF 123.456.789-09 válido conforme dígitos verificadores.")
                .with_url("https://www.gov.br")
                .with_attr("cpf", "123.456.789-09")
                .with_attr("valid", true)],
        );
        results.insert(SubjectField::Cpf, Provider::DirectData, Vec::new());
        results.insert(
            SubjectField::Celular,
            Provider::DirectData,
            vec![SearchItem::new(Provider::DirectData)
                .with_title("Titular")
                .with_attr("cpf", "12345678909")],
        );
        let report = cross_reference(&results, &CrossConfig::default());
        let markdown = render(&subject, &results, &report);

        assert!(markdown.contains("## CPF\n### CPF\n- CPF válido\n  - Nota: CPF 123.456.789-09"));
        assert!(markdown.contains("  - URL: https://www.gov.br\n"));
        assert!(markdown.contains("  - Extras: cpf: 123.456.789-09; valid: true\n"));
        assert!(markdown.contains("### Direct Data\n- (sem itens)\n"));
        assert!(markdown.contains("### CPF: 123.456.789-09\n"));
        assert!(markdown.contains("- CELULAR · Direct Data: Titular\n"));
    }
}
