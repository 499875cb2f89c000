//! Investiga Cross - Identifier extraction and cross-referencing ("cruzamento").
//!
//! Given every normalized item of a search, this crate pulls out canonical
//! identifiers (CPF, CNPJ, CEP, phone, email, name) from structured
//! attributes and free text, then groups items from different fields and
//! providers that share one.
//!
//! # Example
//!
//! ```rust
//! use investiga_core::{CrossConfig, Provider, ResultSet, SearchItem, SubjectField};
//! use investiga_cross::{cross_reference, IdentifierKind};
//!
//! let mut results = ResultSet::new();
//! results.insert(
//!     SubjectField::Cpf,
//!     Provider::Cpf,
//!     vec![SearchItem::new(Provider::Cpf)
//!         .with_title("CPF 123.456.789-09")
//!         .with_attr("cpf", "12345678909")],
//! );
//! results.insert(
//!     SubjectField::Celular,
//!     Provider::DirectData,
//!     vec![SearchItem::new(Provider::DirectData)
//!         .with_title("Titular da linha")
//!         .with_raw(serde_json::json!({"cpf": "12345678909"}))],
//! );
//!
//! let report = cross_reference(&results, &CrossConfig::default());
//! assert_eq!(report.groups.len(), 1);
//! assert_eq!(report.groups[0].kind, IdentifierKind::Cpf);
//! assert_eq!(report.groups[0].matches.len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod engine;
pub mod extract;
pub mod identifier;
pub mod names;

// Re-export commonly used types
pub use engine::{
    cross_reference, CrossEngine, CrossGroup, CrossMatch, CrossReport, GroupTag, ItemKey,
    MembershipIndex, MIN_GROUP_SIZE,
};
pub use extract::{Extractor, Identifiers};
pub use identifier::IdentifierKind;
pub use names::{fold_name, is_generic_name, title_case};
