//! Investiga Core - Foundation crate for the Investiga OSINT aggregator.
//!
//! This crate provides the shared result model, Brazilian document
//! validators, error handling and configuration that all other Investiga
//! crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Provider and subject field enums, the search [`Subject`]
//! - [`item`] - Normalized [`SearchItem`]s and the per-search [`ResultSet`]
//! - [`documents`] - CPF, CNPJ, CEP, PIS, phone and email rules
//!
//! # Example
//!
//! ```rust
//! use investiga_core::{documents, Provider, ResultSet, SearchItem, SubjectField};
//!
//! assert!(documents::is_valid_cnpj("11.222.333/0001-81"));
//!
//! let mut results = ResultSet::new();
//! results.insert(
//!     SubjectField::Cpf,
//!     Provider::Cpf,
//!     vec![SearchItem::new(Provider::Cpf).with_title("CPF válido")],
//! );
//! assert_eq!(results.item_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod documents;
pub mod error;
pub mod item;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, CrossConfig, DatabaseConfig, ExportConfig, ProvidersConfig, SearchConfig,
};
pub use documents::{PhoneInfo, PhoneKind};
pub use error::{ConfigError, ConfigResult, InvestigaError, Result};
pub use item::{ResultSet, SearchItem, ATTR_ERROR, ATTR_NOT_FOUND};
pub use types::{Provider, Subject, SubjectField};
