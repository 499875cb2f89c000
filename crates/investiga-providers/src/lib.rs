//! Investiga Providers - Vendor lookups normalized into search items.
//!
//! Each provider validates its query locally, calls its vendor (local
//! providers call nothing) and maps the payload into the uniform
//! [`SearchItem`](investiga_core::SearchItem) record. The
//! [`ProviderRegistry`] dispatches by [`Provider`](investiga_core::Provider)
//! and turns every failure into a sentinel item.
//!
//! # Example
//!
//! ```rust
//! use investiga_core::Provider;
//! use investiga_providers::{CpfProvider, LookupOptions, ProviderRegistry};
//!
//! # async fn example() {
//! let registry = ProviderRegistry::new().with(CpfProvider);
//! let items = registry
//!     .fetch(Provider::Cpf, "529.982.247-25", &LookupOptions::default())
//!     .await;
//! assert_eq!(items[0].title.as_deref(), Some("CPF válido"));
//! # }
//! ```
//!
//! # Sentinels
//!
//! - malformed query: no items, no network call
//! - vendor has no data: one item with the `not_found` attribute
//! - vendor failed: one item whose title and `error` attribute carry the
//!   operator-facing message

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod provider;
pub mod providers;
pub mod registry;

// Re-export commonly used types
pub use error::{ProviderError, Result};
pub use provider::{LookupOptions, LookupProvider, DEFAULT_MAX_ITEMS};
pub use providers::common::build_http_client;
pub use providers::{
    CepProvider, CltPisProvider, CnpjProvider, CpfProvider, DatajudProvider, DddProvider,
    DirectDataMethod, DirectDataProvider, DuckDuckGoProvider, GithubProvider, HibpProvider,
    PhoneProvider, WikipediaProvider,
};
pub use registry::ProviderRegistry;
