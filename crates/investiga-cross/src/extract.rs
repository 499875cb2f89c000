//! Identifier extraction from normalized items.
//!
//! Candidates come from two places: structured attributes (item attributes
//! and known key paths inside the vendor payload) and free text mined with
//! regular expressions. Every candidate is normalized and shape-checked
//! before it is kept.

use crate::identifier::IdentifierKind;
use investiga_core::{CrossConfig, SearchItem};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use IdentifierKind::{Cep, Cnpj, Cpf, Email, Name, Phone};

/// Item attributes that hold identifiers directly.
const ATTRIBUTE_KEYS: &[(IdentifierKind, &str)] = &[
    (Cpf, "cpf"),
    (Cnpj, "cnpj"),
    (Cep, "cep"),
    (Phone, "phone"),
    (Phone, "telefone"),
    (Phone, "celular"),
    (Phone, "mobile"),
    (Email, "email"),
    (Email, "mail"),
    (Email, "emails"),
    (Name, "partes"),
];

/// Candidate key paths inside vendor payloads, per identifier. The first
/// present candidate wins.
const RAW_CANDIDATES: &[(IdentifierKind, &[&[&str]])] = &[
    (Cpf, &[&["cpf"]]),
    (Cnpj, &[&["cnpj"]]),
    (Cep, &[&["address"], &["addresses"]]),
    (Phone, &[&["phones"], &["phone"]]),
    (Email, &[&["emails"], &["email"]]),
    (
        Name,
        &[&["retorno", "Nome"], &["Nome"], &["nome"], &["name"]],
    ),
];

/// Payload paths that always contribute names.
const RAW_NAME_PATHS: &[&[&str]] = &[
    &["partes"],
    &["company", "name"],
    &["company", "members"],
    &["alias"],
];

/// Identifiers found in one item, normalized and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifiers {
    entries: Vec<(IdentifierKind, String)>,
}

impl Identifiers {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and add a candidate. Returns `true` if it was new.
    pub fn push(&mut self, kind: IdentifierKind, candidate: &str) -> bool {
        let Some(value) = kind.normalize(candidate) else {
            return false;
        };
        if self.contains(kind, &value) {
            return false;
        }
        self.entries.push((kind, value));
        true
    }

    /// Whether a normalized value is present.
    #[must_use]
    pub fn contains(&self, kind: IdentifierKind, value: &str) -> bool {
        self.entries.iter().any(|(k, v)| *k == kind && v == value)
    }

    /// Values of one kind, in discovery order.
    pub fn values(&self, kind: IdentifierKind) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, v)| v.as_str())
    }

    /// All `(kind, value)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (IdentifierKind, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A free-text detection pattern.
#[derive(Clone)]
struct TextPattern {
    kind: IdentifierKind,
    regex: &'static Regex,
}

impl std::fmt::Debug for TextPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPattern")
            .field("kind", &self.kind)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

/// Extracts identifiers from items.
#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: Vec<TextPattern>,
    extract_names: bool,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&CrossConfig::default())
    }
}

impl Extractor {
    /// Create an extractor; name mining from free text follows the config.
    #[must_use]
    pub fn new(config: &CrossConfig) -> Self {
        Self {
            patterns: default_patterns(),
            extract_names: config.extract_names_from_text,
        }
    }

    /// All identifiers of an item: structured sources first, then free text.
    #[must_use]
    pub fn extract(&self, item: &SearchItem) -> Identifiers {
        let mut found = Identifiers::new();
        extract_structured(item, &mut found);
        self.extract_text(&searchable_text(item), &mut found);
        found
    }

    /// Mine identifiers from free text.
    pub fn extract_text(&self, text: &str, found: &mut Identifiers) {
        for pattern in &self.patterns {
            for m in pattern.regex.find_iter(text) {
                found.push(pattern.kind, m.as_str());
            }
        }
        if self.extract_names {
            extract_names(text, found);
        }
    }
}

/// Title, description, URL and source joined for text mining.
#[must_use]
pub fn searchable_text(item: &SearchItem) -> String {
    [
        item.title.as_deref(),
        item.description.as_deref(),
        item.url.as_deref(),
        Some(item.source.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Identifiers from item attributes and the vendor payload.
pub fn extract_structured(item: &SearchItem, found: &mut Identifiers) {
    for (kind, key) in ATTRIBUTE_KEYS {
        if let Some(value) = item.attr(key) {
            collect(*kind, value, found);
        }
    }

    let Some(raw) = item.raw.as_ref() else {
        return;
    };
    for (kind, candidates) in RAW_CANDIDATES {
        let Some(value) = first_present(raw, candidates) else {
            continue;
        };
        if *kind == Cep {
            // Only the first address of a list is considered
            let address = match value {
                Value::Array(items) => items.first(),
                other => Some(other),
            };
            if let Some(Value::Object(map)) = address {
                collect_object(Cep, map, found);
            }
        } else {
            collect(*kind, value, found);
        }
    }
    for path in RAW_NAME_PATHS {
        if let Some(value) = lookup_path(raw, path) {
            collect(Name, value, found);
        }
    }
}

fn lookup_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

fn first_present<'a>(raw: &'a Value, candidates: &[&[&str]]) -> Option<&'a Value> {
    candidates
        .iter()
        .filter_map(|path| lookup_path(raw, path))
        .find(|value| match value {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn collect(kind: IdentifierKind, value: &Value, found: &mut Identifiers) {
    match value {
        Value::String(s) => {
            found.push(kind, s);
        }
        Value::Number(n) => {
            found.push(kind, &n.to_string());
        }
        Value::Array(items) => {
            for item in items {
                collect(kind, item, found);
            }
        }
        Value::Object(map) => collect_object(kind, map, found),
        Value::Null | Value::Bool(_) => {}
    }
}

/// Objects that wrap an identifier: `{area, number}` phones, `{address}`
/// emails, `{zip}` addresses, `{person: {name}}` members.
fn collect_object(kind: IdentifierKind, map: &Map<String, Value>, found: &mut Identifiers) {
    match kind {
        Phone => {
            let area = first_scalar(map, &["area", "ddd"]).unwrap_or_default();
            if let Some(number) = first_scalar(map, &["number", "numero"]) {
                found.push(Phone, &format!("{area}{number}"));
            }
        }
        Email => {
            if let Some(email) = first_scalar(map, &["address", "email"]) {
                found.push(Email, &email);
            }
        }
        Cep => {
            if let Some(cep) = first_scalar(map, &["zip", "cep"]) {
                found.push(Cep, &cep);
            }
        }
        Name => {
            if let Some(name) = first_scalar(map, &["nome", "name"]) {
                found.push(Name, &name);
            } else if let Some(person) = map.get("person") {
                collect(Name, person, found);
            }
        }
        Cpf | Cnpj => {}
    }
}

fn first_scalar(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn extract_names(text: &str, found: &mut Identifiers) {
    for caps in NAME_REGEX.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        let candidate = m.as_str();
        let tokens = candidate.split_whitespace().count();
        if !(2..=6).contains(&tokens) {
            continue;
        }
        let long_enough = Name
            .normalize(candidate)
            .is_some_and(|n| n.chars().count() > 6);
        if long_enough {
            found.push(Name, candidate);
        }
    }
}

/// Default free-text patterns.
fn default_patterns() -> Vec<TextPattern> {
    vec![
        TextPattern {
            kind: Cpf,
            regex: &CPF_FORMATTED_REGEX,
        },
        TextPattern {
            kind: Cpf,
            regex: &CPF_RAW_REGEX,
        },
        TextPattern {
            kind: Cnpj,
            regex: &CNPJ_FORMATTED_REGEX,
        },
        TextPattern {
            kind: Cnpj,
            regex: &CNPJ_RAW_REGEX,
        },
        TextPattern {
            kind: Cep,
            regex: &CEP_REGEX,
        },
        TextPattern {
            kind: Phone,
            regex: &PHONE_REGEX,
        },
        TextPattern {
            kind: Email,
            regex: &EMAIL_REGEX,
        },
    ]
}

// Compiled regex patterns
static CPF_FORMATTED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}\.\d{3}\.\d{3}-\d{2}\b").expect("valid CPF regex"));

static CPF_RAW_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{11}\b").expect("valid raw CPF regex"));

static CNPJ_FORMATTED_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{2}\.\d{3}\.\d{3}/\d{4}-\d{2}\b").expect("valid CNPJ regex")
});

static CNPJ_RAW_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{14}\b").expect("valid raw CNPJ regex"));

static CEP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{5}-?\d{3}\b").expect("valid CEP regex"));

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\(?\d{2}\)?\s*)?\d{4,5}-?\d{4}\b").expect("valid phone regex")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b([A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][a-záàâãéêíóôõúç]+(?:\s+(?:de|da|do|dos|das|e|y|d')?\s*[A-ZÁÀÂÃÉÊÍÓÔÕÚÇ][a-záàâãéêíóôõúç]+)+)\b",
    )
    .expect("valid name regex")
});
