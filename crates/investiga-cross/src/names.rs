//! Personal name folding and the common-name heuristic.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["de", "da", "do", "dos", "das", "e", "y", "d'", "del", "di"]
        .into_iter()
        .collect()
});

static COMMON_FIRST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "maria", "joao", "jose", "ana", "carlos", "paulo", "luiz", "lucas", "pedro", "antonio",
        "marcos", "roberto", "bruno", "gabriel", "rafael", "rodrigo", "andre", "fernando",
        "francisco", "juliana", "patricia", "aline", "claudio",
    ]
    .into_iter()
    .collect()
});

static COMMON_LAST_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "silva", "santos", "souza", "pereira", "almeida", "costa", "rodrigues", "ferreira",
        "oliveira", "lima", "araujo", "mendes", "barbosa", "ribeiro", "carvalho", "gomes",
        "martins", "pinto", "teixeira", "morais", "miranda", "medeiros",
    ]
    .into_iter()
    .collect()
});

/// Fold a name for comparison.
///
/// Strips diacritics (so `ç` becomes `c`), lower-cases, collapses whitespace
/// and drops Portuguese/Spanish connectives. `"Maria da Silva"` and
/// `"MARIA SILVA"` fold to the same value.
#[must_use]
pub fn fold_name(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    stripped
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whether a name is too common to identify anyone on its own.
///
/// Single tokens, short two-token names and common first + last name pairs
/// (with at most one middle name) count as generic.
#[must_use]
pub fn is_generic_name(name: &str) -> bool {
    let folded = fold_name(name);
    let tokens: Vec<&str> = folded.split(' ').filter(|t| !t.is_empty()).collect();

    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return true;
    };
    if tokens.len() <= 1 {
        return true;
    }
    if tokens.len() <= 2 && folded.chars().count() <= 14 {
        return true;
    }
    tokens.len() <= 3 && COMMON_FIRST_NAMES.contains(first) && COMMON_LAST_NAMES.contains(last)
}

/// Title-case a name for display and quoted web queries.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
