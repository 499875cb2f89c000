//! Normalized lookup results.
//!
//! Every provider's payload ends up as a list of [`SearchItem`]s, and a whole
//! search is a [`ResultSet`] keyed by subject field and provider.

use crate::types::{Provider, SubjectField};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Attribute set on "no data" sentinel items.
pub const ATTR_NOT_FOUND: &str = "not_found";

/// Attribute set on vendor failure sentinel items.
pub const ATTR_ERROR: &str = "error";

/// One normalized lookup result.
///
/// Provider-specific facts (`cpf`, `ddd`, `cities`, `valid`, ...) live in
/// [`extra`](Self::extra) and serialize at the top level next to the common
/// fields. Items are read-only once a provider has returned them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Headline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Summary or snippet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to the source record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Provider that produced the item
    pub source: Provider,
    /// Vendor payload exactly as received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    /// Provider-specific attributes
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SearchItem {
    /// Create an empty item for a provider.
    #[must_use]
    pub fn new(source: Provider) -> Self {
        Self {
            title: None,
            description: None,
            url: None,
            source,
            raw: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sentinel for an expected "no data" outcome (unknown CEP, no breaches).
    #[must_use]
    pub fn not_found(source: Provider, title: impl Into<String>) -> Self {
        Self::new(source)
            .with_title(title)
            .with_attr(ATTR_NOT_FOUND, true)
    }

    /// Sentinel for a vendor failure (missing key, HTTP error, bad payload).
    #[must_use]
    pub fn vendor_error(source: Provider, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(source)
            .with_title(message.clone())
            .with_attr(ATTR_ERROR, message)
    }

    /// Set the title; blank strings are ignored.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_blank(title.into());
        self
    }

    /// Set the description; blank strings are ignored.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Set the URL; blank strings are ignored.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = non_blank(url.into());
        self
    }

    /// Attach the vendor payload.
    #[must_use]
    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Attach a provider-specific attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Look up a provider-specific attribute.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Look up a string attribute.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    /// Whether this is a "no data" sentinel.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.attr(ATTR_NOT_FOUND)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Vendor failure message, if this is an error sentinel.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.attr_str(ATTR_ERROR)
    }
}

fn non_blank(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

/// All results of one search, keyed by subject field and provider.
///
/// Built fresh per search and handed to the cross-reference engine once
/// complete. Iteration follows the declaration order of [`SubjectField`] and
/// [`Provider`], which keeps exports and cross groups deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(BTreeMap<SubjectField, BTreeMap<Provider, Vec<SearchItem>>>);

impl ResultSet {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a provider's items for a field, replacing earlier ones.
    pub fn insert(&mut self, field: SubjectField, provider: Provider, items: Vec<SearchItem>) {
        self.0.entry(field).or_default().insert(provider, items);
    }

    /// Append items to a provider's list for a field.
    pub fn extend(
        &mut self,
        field: SubjectField,
        provider: Provider,
        items: impl IntoIterator<Item = SearchItem>,
    ) {
        self.0
            .entry(field)
            .or_default()
            .entry(provider)
            .or_default()
            .extend(items);
    }

    /// Items a provider returned for a field.
    #[must_use]
    pub fn get(&self, field: SubjectField, provider: Provider) -> &[SearchItem] {
        self.0
            .get(&field)
            .and_then(|providers| providers.get(&provider))
            .map_or(&[], Vec::as_slice)
    }

    /// Per-provider results for one field.
    #[must_use]
    pub fn field(&self, field: SubjectField) -> Option<&BTreeMap<Provider, Vec<SearchItem>>> {
        self.0.get(&field)
    }

    /// Fields that have results.
    pub fn fields(&self) -> impl Iterator<Item = SubjectField> + '_ {
        self.0.keys().copied()
    }

    /// Every `(field, provider, items)` batch in order.
    pub fn batches(&self) -> impl Iterator<Item = (SubjectField, Provider, &[SearchItem])> + '_ {
        self.0.iter().flat_map(|(&field, providers)| {
            providers
                .iter()
                .map(move |(&provider, items)| (field, provider, items.as_slice()))
        })
    }

    /// Every `(field, provider, item)` triple in order.
    pub fn iter(&self) -> impl Iterator<Item = (SubjectField, Provider, &SearchItem)> + '_ {
        self.batches()
            .flat_map(|(field, provider, items)| items.iter().map(move |item| (field, provider, item)))
    }

    /// Total number of items.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.batches().map(|(_, _, items)| items.len()).sum()
    }

    /// Whether no provider produced any batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
