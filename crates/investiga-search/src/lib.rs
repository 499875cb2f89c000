//! Investiga Search - Routes a subject to providers and cross-references the answers.
//!
//! # Example
//!
//! ```rust,no_run
//! use investiga_core::{AppConfig, Subject, SubjectField};
//! use investiga_search::{SearchOrchestrator, SearchSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let orchestrator = SearchOrchestrator::from_config(AppConfig::default())?;
//! let session = SearchSession::new();
//!
//! let subject = Subject::default()
//!     .with(SubjectField::Cpf, "529.982.247-25")
//!     .with(SubjectField::Celular, "(11) 98765-4321");
//! let outcome = orchestrator.search(&subject, &session.begin()).await?;
//!
//! for group in &outcome.report.groups {
//!     println!("{} {} ({} matches)", group.kind, group.value, group.matches.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod orchestrator;
pub mod routing;
pub mod session;

// Re-export commonly used types
pub use error::{Result, SearchError};
pub use orchestrator::{SearchOrchestrator, SearchOutcome};
pub use routing::{duckduckgo_query, normalize_field_value, providers_for_field, GOVERNMENT_SITES};
pub use session::SearchSession;
