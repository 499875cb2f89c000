//! Canonical identifier kinds and their normalization rules.

use crate::names::fold_name;
use investiga_core::documents;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of identifier the engine groups on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Individual taxpayer number (11 digits)
    Cpf,
    /// Company taxpayer number (14 digits)
    Cnpj,
    /// Postal code (8 digits)
    Cep,
    /// National phone number (10 or 11 digits)
    Phone,
    /// Email address
    Email,
    /// Folded personal or company name
    Name,
}

impl IdentifierKind {
    /// Every kind in declaration order.
    pub const ALL: [IdentifierKind; 6] = [
        IdentifierKind::Cpf,
        IdentifierKind::Cnpj,
        IdentifierKind::Cep,
        IdentifierKind::Phone,
        IdentifierKind::Email,
        IdentifierKind::Name,
    ];

    /// Lower-case name, also used as the primary group sort key.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Cep => "cep",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Name => "name",
        }
    }

    /// Label shown in exports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Cep => "CEP",
            Self::Phone => "Telefone",
            Self::Email => "Email",
            Self::Name => "Nome",
        }
    }

    /// Canonical form of a candidate, or `None` if it fails the shape check.
    ///
    /// Numeric kinds keep digits only and require an exact length; emails are
    /// trimmed and lower-cased; names are folded (see [`fold_name`]). The
    /// result is a fixed point: normalizing it again returns the same value.
    #[must_use]
    pub fn normalize(&self, candidate: &str) -> Option<String> {
        match self {
            Self::Cpf => exact_digits(candidate, 11),
            Self::Cnpj => exact_digits(candidate, 14),
            Self::Cep => documents::normalize_cep(candidate),
            Self::Phone => documents::phone_digits(candidate),
            Self::Email => {
                let email = documents::normalize_email(candidate);
                documents::is_valid_email(&email).then_some(email)
            }
            Self::Name => {
                let name = fold_name(candidate);
                (name.chars().count() > 2).then_some(name)
            }
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn exact_digits(candidate: &str, len: usize) -> Option<String> {
    let digits = documents::only_digits(candidate);
    (digits.len() == len).then_some(digits)
}
