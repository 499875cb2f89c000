//! Investiga Export - CSV, JSON and Markdown dossiers.
//!
//! Every export is derived from the same [`Dossier`]: the subject, the
//! result set and the cross-reference report. [`ExportOptions::only_crossed`]
//! narrows the items to those that take part in a cross group.
//!
//! # Example
//!
//! ```rust
//! use investiga_core::{ResultSet, Subject};
//! use investiga_cross::CrossReport;
//! use investiga_export::{Dossier, ExportFormat, ExportOptions};
//!
//! let subject = Subject::default();
//! let results = ResultSet::new();
//! let report = CrossReport::default();
//!
//! let dossier = Dossier::new(&subject, &results, &report);
//! let csv = ExportFormat::Csv
//!     .render(&dossier, &ExportOptions::default())
//!     .expect("render");
//! assert_eq!(csv, "campo,provedor,titulo,descricao,url,fonte,data,json,raw");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod csv;
pub mod dossier;
pub mod error;
pub mod format;
pub mod json;
pub mod markdown;

// Re-export commonly used types
pub use csv::{escape_csv, pick_date, to_csv, CSV_HEADER};
pub use dossier::{Dossier, ExportOptions};
pub use error::{ExportError, Result};
pub use format::ExportFormat;
pub use json::to_json;
pub use markdown::to_markdown;
