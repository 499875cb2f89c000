//! Shared enums and the search subject.
//!
//! [`Provider`] and [`SubjectField`] double as ordered map keys in
//! [`ResultSet`](crate::ResultSet), so their declaration order is the order in
//! which results are iterated, exported and cross-referenced.

use crate::error::InvestigaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A lookup source whose results are normalized into [`SearchItem`](crate::SearchItem)s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    /// Local CPF check-digit validation
    Cpf,
    /// CNPJ validation plus company lookup (CNPJa open API)
    Cnpj,
    /// Address lookup by postal code (ViaCEP)
    Cep,
    /// Local Brazilian phone formatting and classification
    Phone,
    /// Area code lookup (BrasilAPI)
    #[serde(rename = "ddd_brasilapi")]
    DddBrasilApi,
    /// Local PIS/NIT validation
    CltPis,
    /// Configurable people-data vendor
    #[serde(rename = "directdata")]
    DirectData,
    /// Court records (CNJ Datajud public API)
    Datajud,
    /// Breach lookup (Have I Been Pwned)
    EmailHibp,
    /// DuckDuckGo instant answers
    #[serde(rename = "duckduckgo")]
    DuckDuckGo,
    /// Wikipedia full-text search
    Wikipedia,
    /// GitHub repository search
    Github,
}

impl Provider {
    /// Every provider in declaration order.
    pub const ALL: [Provider; 12] = [
        Provider::Cpf,
        Provider::Cnpj,
        Provider::Cep,
        Provider::Phone,
        Provider::DddBrasilApi,
        Provider::CltPis,
        Provider::DirectData,
        Provider::Datajud,
        Provider::EmailHibp,
        Provider::DuckDuckGo,
        Provider::Wikipedia,
        Provider::Github,
    ];

    /// Stable identifier used in result sets, exports and configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Cep => "cep",
            Self::Phone => "phone",
            Self::DddBrasilApi => "ddd_brasilapi",
            Self::CltPis => "clt_pis",
            Self::DirectData => "directdata",
            Self::Datajud => "datajud",
            Self::EmailHibp => "email_hibp",
            Self::DuckDuckGo => "duckduckgo",
            Self::Wikipedia => "wikipedia",
            Self::Github => "github",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Cep => "CEP (ViaCEP)",
            Self::Phone => "Telefone",
            Self::DddBrasilApi => "DDD (BrasilAPI)",
            Self::CltPis => "PIS/NIT",
            Self::DirectData => "Direct Data",
            Self::Datajud => "Datajud (CNJ)",
            Self::EmailHibp => "Have I Been Pwned",
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Wikipedia => "Wikipedia",
            Self::Github => "GitHub",
        }
    }

    /// Whether the provider describes companies rather than people.
    #[must_use]
    pub fn is_company_oriented(&self) -> bool {
        matches!(self, Self::Cnpj)
    }

    /// Whether the provider describes natural persons.
    #[must_use]
    pub fn is_person_oriented(&self) -> bool {
        matches!(self, Self::Cpf | Self::DirectData | Self::Datajud)
    }

    /// Whether the provider runs without any network call.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Cpf | Self::Phone | Self::CltPis)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = InvestigaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == needle)
            .ok_or_else(|| InvestigaError::Unknown {
                kind: "provider",
                value: s.to_string(),
            })
    }
}

/// The subject attribute a batch of results was searched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectField {
    /// Individual taxpayer number
    Cpf,
    /// Company taxpayer number
    Cnpj,
    /// State identity document
    Rg,
    /// Postal code
    Cep,
    /// Mobile or landline number
    Celular,
    /// Full name
    Nome,
    /// Email address
    Email,
}

impl SubjectField {
    /// Every field in search order.
    pub const ALL: [SubjectField; 7] = [
        SubjectField::Cpf,
        SubjectField::Cnpj,
        SubjectField::Rg,
        SubjectField::Cep,
        SubjectField::Celular,
        SubjectField::Nome,
        SubjectField::Email,
    ];

    /// Stable identifier used in result sets and exports.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Rg => "rg",
            Self::Cep => "cep",
            Self::Celular => "celular",
            Self::Nome => "nome",
            Self::Email => "email",
        }
    }

    /// Upper-case label used in dossier headings.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Cpf => "CPF",
            Self::Cnpj => "CNPJ",
            Self::Rg => "RG",
            Self::Cep => "CEP",
            Self::Celular => "CELULAR",
            Self::Nome => "NOME",
            Self::Email => "EMAIL",
        }
    }
}

impl fmt::Display for SubjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectField {
    type Err = InvestigaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let needle = match needle.as_str() {
            "telefone" | "phone" => "celular",
            "name" => "nome",
            other => other,
        };
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == needle)
            .ok_or_else(|| InvestigaError::Unknown {
                kind: "field",
                value: s.to_string(),
            })
    }
}

/// The person or company being investigated.
///
/// Every field is optional; a search runs one batch per non-blank field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subject {
    /// CPF as typed by the operator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    /// CNPJ as typed by the operator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnpj: Option<String>,
    /// RG as typed by the operator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rg: Option<String>,
    /// CEP as typed by the operator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep: Option<String>,
    /// Phone number as typed by the operator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub celular: Option<String>,
    /// Full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Subject {
    /// Raw value for a field, if present and not blank.
    #[must_use]
    pub fn get(&self, field: SubjectField) -> Option<&str> {
        let value = match field {
            SubjectField::Cpf => self.cpf.as_deref(),
            SubjectField::Cnpj => self.cnpj.as_deref(),
            SubjectField::Rg => self.rg.as_deref(),
            SubjectField::Cep => self.cep.as_deref(),
            SubjectField::Celular => self.celular.as_deref(),
            SubjectField::Nome => self.nome.as_deref(),
            SubjectField::Email => self.email.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// Set a field value.
    pub fn set(&mut self, field: SubjectField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            SubjectField::Cpf => self.cpf = value,
            SubjectField::Cnpj => self.cnpj = value,
            SubjectField::Rg => self.rg = value,
            SubjectField::Cep => self.cep = value,
            SubjectField::Celular => self.celular = value,
            SubjectField::Nome => self.nome = value,
            SubjectField::Email => self.email = value,
        }
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, field: SubjectField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Fields that carry a value, in search order.
    pub fn present_fields(&self) -> impl Iterator<Item = (SubjectField, &str)> + '_ {
        SubjectField::ALL
            .iter()
            .filter_map(move |&field| self.get(field).map(|v| (field, v)))
    }

    /// Whether no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present_fields().next().is_none()
    }
}
