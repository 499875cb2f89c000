//! The material every export is rendered from.

use chrono::{DateTime, SecondsFormat, Utc};
use investiga_core::{AppConfig, ResultSet, Subject};
use investiga_cross::{CrossGroup, CrossReport};
use std::borrow::Cow;

/// Options shared by every export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Keep only items that take part in a cross group
    pub only_crossed: bool,
    /// Leave out name groups whose value looks like a common name
    pub hide_generic_names: bool,
}

impl ExportOptions {
    /// Options from the `export` and `cross` config sections.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            only_crossed: config.export.only_crossed,
            hide_generic_names: config.cross.hide_generic_names,
        }
    }
}

/// A search result ready to be exported.
#[derive(Debug, Clone, Copy)]
pub struct Dossier<'a> {
    /// Subject as searched
    pub subject: &'a Subject,
    /// Items per field and provider
    pub results: &'a ResultSet,
    /// Cross-reference report
    pub report: &'a CrossReport,
    /// Generation time
    pub generated_at: DateTime<Utc>,
}

impl<'a> Dossier<'a> {
    /// Dossier generated now.
    #[must_use]
    pub fn new(subject: &'a Subject, results: &'a ResultSet, report: &'a CrossReport) -> Self {
        Self {
            subject,
            results,
            report,
            generated_at: Utc::now(),
        }
    }

    /// Override the generation time.
    #[must_use]
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Generation time in RFC 3339 with millisecond precision.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Results honoring `only_crossed`.
    #[must_use]
    pub fn selected_results(&self, options: &ExportOptions) -> Cow<'a, ResultSet> {
        if !options.only_crossed {
            return Cow::Borrowed(self.results);
        }
        let membership = &self.report.membership;
        let mut crossed = ResultSet::new();
        for (field, provider, item) in self.results.iter() {
            if membership.contains(field, provider, item) {
                crossed.extend(field, provider, [item.clone()]);
            }
        }
        Cow::Owned(crossed)
    }

    /// Groups to present, honoring `hide_generic_names`.
    #[must_use]
    pub fn groups(&self, options: &ExportOptions) -> Vec<&'a CrossGroup> {
        self.report
            .groups
            .iter()
            .filter(|g| !(options.hide_generic_names && g.is_generic_name()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use investiga_core::{CrossConfig, Provider, SearchItem, SubjectField};
    use investiga_cross::cross_reference;

    fn sample() -> (Subject, ResultSet) {
        let subject = Subject::default().with(SubjectField::Cpf, "123.456.789-09");
        let mut results = ResultSet::new();
        results.insert(
            SubjectField::Cpf,
            Provider::Cpf,
            vec![SearchItem::new(Provider::Cpf)
                .with_title("CPF válido")
                .with_attr("cpf", "123.456.789-09")],
        );
        results.insert(
            SubjectField::Celular,
            Provider::DirectData,
            vec![
                SearchItem::new(Provider::DirectData)
                    .with_title("Titular")
                    .with_attr("cpf", "12345678909"),
                SearchItem::new(Provider::DirectData).with_title("Outro registro"),
            ],
        );
        (subject, results)
    }

    #[test]
    fn test_only_crossed_keeps_group_members() {
        let (subject, results) = sample();
        let report = cross_reference(&results, &CrossConfig::default());
        let dossier = Dossier::new(&subject, &results, &report);

        let all = dossier.selected_results(&ExportOptions::default());
        assert_eq!(all.item_count(), 3);

        let crossed = dossier.selected_results(&ExportOptions {
            only_crossed: true,
            ..ExportOptions::default()
        });
        assert_eq!(crossed.item_count(), 2);
        assert!(crossed
            .iter()
            .all(|(_, _, item)| item.title.as_deref() != Some("Outro registro")));
    }

    #[test]
    fn test_timestamp_format() {
        let (subject, results) = sample();
        let report = CrossReport::default();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).single().expect("valid time");
        let dossier = Dossier::new(&subject, &results, &report).generated_at(at);
        assert_eq!(dossier.timestamp(), "2024-05-01T12:30:00.000Z");
    }
}
