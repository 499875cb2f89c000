//! The cross-reference engine.
//!
//! Groups items from different fields and providers that share a
//! normalized identifier. The engine is a pure function of the
//! [`ResultSet`]: it never fails, performs no I/O and produces the same
//! groups in the same order for the same input.

use crate::extract::Extractor;
use crate::identifier::IdentifierKind;
use crate::names::is_generic_name;
use investiga_core::{CrossConfig, Provider, ResultSet, SearchItem, SubjectField};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Minimum number of matches for a value to form a group.
pub const MIN_GROUP_SIZE: usize = 2;

/// One item taking part in a cross group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossMatch {
    /// Field the item was searched under
    pub field: SubjectField,
    /// Provider that returned the item
    pub provider: Provider,
    /// Item title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Item URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Item source
    pub source: Provider,
    /// Item description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CrossMatch {
    fn new(field: SubjectField, provider: Provider, item: &SearchItem) -> Self {
        Self {
            field,
            provider,
            title: item.title.clone(),
            url: item.url.clone(),
            source: item.source,
            description: item.description.clone(),
        }
    }

    /// Membership key of the matched item.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey {
            field: self.field,
            provider: self.provider,
            title: self.title.clone(),
            url: self.url.clone(),
            source: self.source,
        }
    }
}

/// Derived label for name groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupTag {
    /// The same name came back from a company source and a person source
    PersonCompany,
}

/// Items sharing one normalized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossGroup {
    /// Identifier kind
    #[serde(rename = "type")]
    pub kind: IdentifierKind,
    /// Normalized identifier value
    pub value: String,
    /// Matching items in encounter order (at least two)
    pub matches: Vec<CrossMatch>,
    /// Person/company crossover for name groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<GroupTag>,
}

impl CrossGroup {
    /// Distinct fields among the matches.
    #[must_use]
    pub fn fields(&self) -> Vec<SubjectField> {
        let mut fields: Vec<_> = self.matches.iter().map(|m| m.field).collect();
        fields.sort_unstable();
        fields.dedup();
        fields
    }

    /// Whether this is a name group whose value looks like a common name.
    #[must_use]
    pub fn is_generic_name(&self) -> bool {
        self.kind == IdentifierKind::Name && is_generic_name(&self.value)
    }
}

fn name_tag(matches: &[CrossMatch]) -> Option<GroupTag> {
    let company = matches.iter().any(|m| m.provider.is_company_oriented());
    let person = matches.iter().any(|m| m.provider.is_person_oriented());
    (company && person).then_some(GroupTag::PersonCompany)
}

/// Identity of an item inside a result set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    /// Field the item was searched under
    pub field: SubjectField,
    /// Provider that returned the item
    pub provider: Provider,
    /// Item title
    pub title: Option<String>,
    /// Item URL
    pub url: Option<String>,
    /// Item source
    pub source: Provider,
}

impl ItemKey {
    /// Key of an item stored under `field` / `provider`.
    #[must_use]
    pub fn of(field: SubjectField, provider: Provider, item: &SearchItem) -> Self {
        Self {
            field,
            provider,
            title: item.title.clone(),
            url: item.url.clone(),
            source: item.source,
        }
    }
}

/// Set of items that belong to at least one group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipIndex {
    keys: HashSet<ItemKey>,
}

impl MembershipIndex {
    /// Build the index from groups.
    #[must_use]
    pub fn from_groups(groups: &[CrossGroup]) -> Self {
        Self {
            keys: groups
                .iter()
                .flat_map(|g| g.matches.iter().map(CrossMatch::key))
                .collect(),
        }
    }

    /// Whether an item belongs to some group.
    #[must_use]
    pub fn contains(&self, field: SubjectField, provider: Provider, item: &SearchItem) -> bool {
        self.keys.contains(&ItemKey::of(field, provider, item))
    }

    /// Number of distinct member items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether no item is crossed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Output of the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReport {
    /// Groups sorted by kind name, then value
    pub groups: Vec<CrossGroup>,
    /// Items in any group
    #[serde(skip)]
    pub membership: MembershipIndex,
}

impl CrossReport {
    /// Rebuild a report from stored groups.
    #[must_use]
    pub fn from_groups(groups: Vec<CrossGroup>) -> Self {
        let membership = MembershipIndex::from_groups(&groups);
        Self { groups, membership }
    }

    /// Groups to present, honoring `hide_generic_names`.
    pub fn visible_groups<'a>(
        &'a self,
        config: &CrossConfig,
    ) -> impl Iterator<Item = &'a CrossGroup> + 'a {
        let hide = config.hide_generic_names;
        self.groups
            .iter()
            .filter(move |g| !(hide && g.is_generic_name()))
    }

    /// Groups of one identifier kind.
    pub fn groups_of(&self, kind: IdentifierKind) -> impl Iterator<Item = &CrossGroup> + '_ {
        self.groups.iter().filter(move |g| g.kind == kind)
    }

    /// Whether no group was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Cross-reference engine.
#[derive(Debug, Clone, Default)]
pub struct CrossEngine {
    extractor: Extractor,
}

impl CrossEngine {
    /// Create an engine for the given settings.
    #[must_use]
    pub fn new(config: &CrossConfig) -> Self {
        Self {
            extractor: Extractor::new(config),
        }
    }

    /// Group every item of `results` by shared identifiers.
    #[must_use]
    pub fn run(&self, results: &ResultSet) -> CrossReport {
        let mut occurrences: BTreeMap<(IdentifierKind, String), Vec<CrossMatch>> =
            BTreeMap::new();

        for (field, provider, item) in results.iter() {
            let identifiers = self.extractor.extract(item);
            for (kind, value) in identifiers.iter() {
                occurrences
                    .entry((kind, value.to_string()))
                    .or_default()
                    .push(CrossMatch::new(field, provider, item));
            }
        }

        let mut groups: Vec<CrossGroup> = occurrences
            .into_iter()
            .filter(|(_, matches)| matches.len() >= MIN_GROUP_SIZE)
            .map(|((kind, value), matches)| {
                let tag = if kind == IdentifierKind::Name {
                    name_tag(&matches)
                } else {
                    None
                };
                CrossGroup {
                    kind,
                    value,
                    matches,
                    tag,
                }
            })
            .collect();

        groups.sort_by(|a, b| {
            a.kind
                .as_str()
                .cmp(b.kind.as_str())
                .then_with(|| a.value.cmp(&b.value))
        });

        tracing::debug!(
            items = results.item_count(),
            groups = groups.len(),
            "cross-reference complete"
        );

        CrossReport::from_groups(groups)
    }
}

/// Run the engine once with the given settings.
#[must_use]
pub fn cross_reference(results: &ResultSet, config: &CrossConfig) -> CrossReport {
    CrossEngine::new(config).run(results)
}
