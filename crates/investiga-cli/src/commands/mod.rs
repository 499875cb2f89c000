//! Subcommand implementations.

pub mod history;
pub mod search;
pub mod validate;

use investiga_core::{Subject, SubjectField};

const SUBJECT_ORDER: [SubjectField; 7] = [
    SubjectField::Nome,
    SubjectField::Cpf,
    SubjectField::Cnpj,
    SubjectField::Celular,
    SubjectField::Cep,
    SubjectField::Rg,
    SubjectField::Email,
];

/// One-line `LABEL: value · LABEL: value` summary of a subject.
pub fn subject_summary(subject: &Subject) -> String {
    let parts: Vec<String> = SUBJECT_ORDER
        .iter()
        .filter_map(|&field| subject.get(field).map(|v| format!("{}: {v}", field.label())))
        .collect();
    if parts.is_empty() {
        "(vazio)".to_string()
    } else {
        parts.join(" · ")
    }
}
