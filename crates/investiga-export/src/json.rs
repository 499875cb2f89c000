//! JSON dossier export.

use crate::dossier::{Dossier, ExportOptions};
use crate::error::Result;
use investiga_core::{ResultSet, Subject};
use investiga_cross::CrossGroup;
use serde::Serialize;

#[derive(Serialize)]
struct JsonDossier<'a> {
    generated_at: String,
    subject: &'a Subject,
    results: &'a ResultSet,
    cross_groups: Vec<&'a CrossGroup>,
}

/// Render `{generated_at, subject, results, cross_groups}` as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(dossier: &Dossier<'_>, options: &ExportOptions) -> Result<String> {
    let results = dossier.selected_results(options);
    let document = JsonDossier {
        generated_at: dossier.timestamp(),
        subject: dossier.subject,
        results: &results,
        cross_groups: dossier.groups(options),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
