//! `investiga validate`

use anyhow::Result;
use clap::{Args, ValueEnum};
use investiga_core::documents::{
    format_cep, format_cnpj, format_cpf, format_pis, is_valid_cnpj, is_valid_cpf, is_valid_email,
    is_valid_pis, normalize_email, parse_phone,
};

/// Kinds of document `validate` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    /// Individual taxpayer number
    Cpf,
    /// Company taxpayer number
    Cnpj,
    /// Postal code
    Cep,
    /// Brazilian phone number
    Phone,
    /// PIS/PASEP/NIT
    Pis,
    /// Email address
    Email,
}

impl DocumentKind {
    fn label(self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Cep => "CEP",
            Self::Phone => "Telefone",
            Self::Pis => "PIS/NIT",
            Self::Email => "Email",
        }
    }
}

/// Document to validate.
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document kind
    pub kind: DocumentKind,
    /// Value as typed
    pub value: String,
}

/// Canonical form of a valid value, `None` when invalid.
pub fn check(kind: DocumentKind, value: &str) -> Option<String> {
    match kind {
        DocumentKind::Cpf => is_valid_cpf(value).then(|| format_cpf(value)).flatten(),
        DocumentKind::Cnpj => is_valid_cnpj(value).then(|| format_cnpj(value)).flatten(),
        DocumentKind::Cep => format_cep(value),
        DocumentKind::Pis => is_valid_pis(value).then(|| format_pis(value)).flatten(),
        DocumentKind::Email => {
            let email = normalize_email(value);
            is_valid_email(&email).then_some(email)
        }
        DocumentKind::Phone => parse_phone(value).map(|phone| {
            format!(
                "{} ({}, DDD {}, {})",
                phone.formatted, phone.kind, phone.ddd, phone.e164
            )
        }),
    }
}

/// Print the canonical form, or fail when the value is invalid.
pub fn run(args: &ValidateArgs) -> Result<()> {
    match check(args.kind, &args.value) {
        Some(canonical) => {
            println!("{} válido: {canonical}", args.kind.label());
            Ok(())
        }
        None => anyhow::bail!("{} inválido: {}", args.kind.label(), args.value.trim()),
    }
}
