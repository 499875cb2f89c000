//! The lookup provider trait and per-call options.

use crate::error::Result;
use async_trait::async_trait;
use investiga_core::{Provider, SearchItem, SubjectField};

/// Default upper bound on items kept from list-style providers.
pub const DEFAULT_MAX_ITEMS: usize = 5;

/// Trait for lookup providers.
///
/// A provider validates the query locally, calls its vendor (if any) and
/// normalizes the payload into [`SearchItem`]s. Malformed queries yield an
/// empty list without any network call; expected "no data" outcomes yield a
/// `not_found` sentinel. Vendor failures are returned as errors and turned
/// into sentinels by the [`ProviderRegistry`](crate::ProviderRegistry).
#[async_trait]
pub trait LookupProvider: Send + Sync {
    /// Which provider this is.
    fn provider(&self) -> Provider;

    /// Look up a trimmed query.
    ///
    /// # Errors
    /// Returns error if the provider is not configured, the vendor call fails
    /// or the payload cannot be parsed.
    async fn lookup(&self, query: &str, options: &LookupOptions) -> Result<Vec<SearchItem>>;
}

/// Options for one provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupOptions {
    /// Subject field being searched, if known
    pub field: Option<SubjectField>,
    /// Upper bound on items from list-style providers
    pub max_items: usize,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            field: None,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl LookupOptions {
    /// Options for a lookup made on behalf of a subject field.
    #[must_use]
    pub fn for_field(field: SubjectField) -> Self {
        Self {
            field: Some(field),
            ..Self::default()
        }
    }

    /// Set the item limit (at least one).
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items.max(1);
        self
    }
}
