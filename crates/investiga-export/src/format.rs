//! Export format selection.

use crate::dossier::{Dossier, ExportOptions};
use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Pretty JSON dossier
    #[default]
    Json,
    /// One row per item
    Csv,
    /// Human-readable dossier
    Markdown,
}

impl ExportFormat {
    /// Format name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "markdown",
        }
    }

    /// File extension for the format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Markdown => "md",
        }
    }

    /// Render a dossier in this format.
    ///
    /// # Errors
    /// Returns error if serialization or writing fails.
    pub fn render(&self, dossier: &Dossier<'_>, options: &ExportOptions) -> Result<String> {
        tracing::debug!(format = self.as_str(), ?options, "rendering export");
        match self {
            Self::Json => crate::json::to_json(dossier, options),
            Self::Csv => crate::csv::to_csv(dossier, options),
            Self::Markdown => crate::markdown::to_markdown(dossier, options),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}
