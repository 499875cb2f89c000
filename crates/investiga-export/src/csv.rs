//! Flat CSV export, one row per item.

use crate::dossier::{Dossier, ExportOptions};
use crate::error::Result;
use investiga_core::{ResultSet, SearchItem};
use serde_json::Value;
use std::fmt::Write as _;

/// Column names, in order.
pub const CSV_HEADER: [&str; 9] = [
    "campo",
    "provedor",
    "titulo",
    "descricao",
    "url",
    "fonte",
    "data",
    "json",
    "raw",
];

const DATE_KEYS: [&str; 5] = ["date", "created_at", "updated_at", "time", "timestamp"];

/// Escape one CSV cell: quotes are doubled, and cells holding a quote,
/// comma, carriage return or line feed are wrapped in quotes.
#[must_use]
pub fn escape_csv(value: &str) -> String {
    let doubled = value.replace('"', "\"\"");
    if doubled.contains(['"', ',', '\n', '\r']) {
        format!("\"{doubled}\"")
    } else {
        doubled
    }
}

/// First present attribute among `date`, `created_at`, `updated_at`,
/// `time`, `timestamp`.
#[must_use]
pub fn pick_date(item: &SearchItem) -> String {
    DATE_KEYS
        .iter()
        .find_map(|key| match item.attr(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .unwrap_or_default()
}

/// Render the dossier's results as CSV.
///
/// # Errors
/// Returns error if an item cannot be serialized for the `json` column.
pub fn to_csv(dossier: &Dossier<'_>, options: &ExportOptions) -> Result<String> {
    write_rows(&dossier.selected_results(options))
}

fn write_rows(results: &ResultSet) -> Result<String> {
    let mut out = CSV_HEADER.join(",");
    for (field, provider, item) in results.iter() {
        let json = serde_json::to_string(item)?;
        let raw = item
            .raw
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?
            .unwrap_or_default();
        let date = pick_date(item);
        let cells: [&str; 9] = [
            field.as_str(),
            provider.as_str(),
            item.title.as_deref().unwrap_or_default(),
            item.description.as_deref().unwrap_or_default(),
            item.url.as_deref().unwrap_or_default(),
            item.source.as_str(),
            &date,
            &json,
            &raw,
        ];
        let row: Vec<String> = cells.iter().map(|cell| escape_csv(cell)).collect();
        write!(out, "\n{}", row.join(","))?;
    }
    Ok(out)
}
