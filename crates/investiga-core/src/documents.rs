//! Brazilian document validators and formatters.
//!
//! Everything here is pure and works on digits only: punctuation in the input
//! is ignored, so `"123.456.789-09"` and `"12345678909"` validate the same way.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const CNPJ_WEIGHTS_FIRST: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_SECOND: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const PIS_WEIGHTS: [u32; 10] = [3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Keep only ASCII digits.
#[must_use]
pub fn only_digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

fn digit_values(digits: &str) -> Vec<u32> {
    digits.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_equal(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}

/// Mod-11 check digit where remainders below 2 map to 0.
fn mod11_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// Validate a CPF (11 digits, two mod-11 check digits, not all equal).
#[must_use]
pub fn is_valid_cpf(input: &str) -> bool {
    let digits = digit_values(&only_digits(input));
    if digits.len() != 11 || all_equal(&digits) {
        return false;
    }
    let first_weights: Vec<u32> = (2..=10).rev().collect();
    let second_weights: Vec<u32> = (2..=11).rev().collect();
    mod11_digit(&digits[..9], &first_weights) == digits[9]
        && mod11_digit(&digits[..10], &second_weights) == digits[10]
}

/// Format 11 digits as `xxx.xxx.xxx-xx`.
#[must_use]
pub fn format_cpf(input: &str) -> Option<String> {
    let d = only_digits(input);
    (d.len() == 11).then(|| format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]))
}

/// Validate a CNPJ (14 digits, two weighted mod-11 check digits, not all equal).
#[must_use]
pub fn is_valid_cnpj(input: &str) -> bool {
    let digits = digit_values(&only_digits(input));
    if digits.len() != 14 || all_equal(&digits) {
        return false;
    }
    mod11_digit(&digits[..12], &CNPJ_WEIGHTS_FIRST) == digits[12]
        && mod11_digit(&digits[..13], &CNPJ_WEIGHTS_SECOND) == digits[13]
}

/// Format 14 digits as `xx.xxx.xxx/xxxx-xx`.
#[must_use]
pub fn format_cnpj(input: &str) -> Option<String> {
    let d = only_digits(input);
    (d.len() == 14).then(|| {
        format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        )
    })
}

/// Digits of a CEP, if there are exactly 8.
#[must_use]
pub fn normalize_cep(input: &str) -> Option<String> {
    let d = only_digits(input);
    (d.len() == 8).then_some(d)
}

/// Format 8 digits as `xxxxx-xxx`.
#[must_use]
pub fn format_cep(input: &str) -> Option<String> {
    normalize_cep(input).map(|d| format!("{}-{}", &d[..5], &d[5..]))
}

/// Validate a PIS/PASEP/NIT number.
#[must_use]
pub fn is_valid_pis(input: &str) -> bool {
    let digits = digit_values(&only_digits(input));
    if digits.len() != 11 {
        return false;
    }
    let sum: u32 = digits[..10]
        .iter()
        .zip(PIS_WEIGHTS)
        .map(|(d, w)| d * w)
        .sum();
    let check = match 11 - sum % 11 {
        10 | 11 => 0,
        d => d,
    };
    check == digits[10]
}

/// Format 11 digits as `xxx.xxxxx.xx-x`.
#[must_use]
pub fn format_pis(input: &str) -> Option<String> {
    let d = only_digits(input);
    (d.len() == 11).then(|| format!("{}.{}.{}-{}", &d[..3], &d[3..8], &d[8..10], &d[10..]))
}

/// Whether a string looks like an email address.
#[must_use]
pub fn is_valid_email(input: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
    regex.is_match(input.trim())
}

/// Trimmed, lower-cased email.
#[must_use]
pub fn normalize_email(input: &str) -> String {
    input.trim().to_lowercase()
}

/// National phone digits (DDD + number), dropping a `55` country code.
///
/// Returns `None` unless the result has 10 or 11 digits.
#[must_use]
pub fn phone_digits(input: &str) -> Option<String> {
    let mut d = only_digits(input);
    if d.len() >= 12 && d.starts_with("55") {
        d.drain(..2);
    }
    matches!(d.len(), 10 | 11).then_some(d)
}

/// Whether a Brazilian number is a mobile or a landline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhoneKind {
    /// Mobile (11 digits, local part starting with 9)
    Celular,
    /// Landline
    Fixo,
}

impl PhoneKind {
    /// Label shown to operators.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Celular => "Celular",
            Self::Fixo => "Fixo",
        }
    }
}

impl fmt::Display for PhoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed Brazilian phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneInfo {
    /// National digits (DDD + local part)
    pub digits: String,
    /// Two-digit area code
    pub ddd: String,
    /// Mobile or landline
    pub kind: PhoneKind,
    /// `(dd) xxxxx-xxxx` or `(dd) xxxx-xxxx`
    pub formatted: String,
    /// `+55` followed by the national digits
    pub e164: String,
}

/// Parse and classify a Brazilian phone number.
///
/// Takes exactly 10 or 11 digits (DDD + number); a country code is not
/// accepted here.
#[must_use]
pub fn parse_phone(input: &str) -> Option<PhoneInfo> {
    let digits = only_digits(input);
    if !matches!(digits.len(), 10 | 11) {
        return None;
    }
    let (ddd, local) = digits.split_at(2);
    let kind = if local.len() == 9 && local.starts_with('9') {
        PhoneKind::Celular
    } else {
        PhoneKind::Fixo
    };
    let split = local.len() - 4;
    let formatted = format!("({ddd}) {}-{}", &local[..split], &local[split..]);

    Some(PhoneInfo {
        ddd: ddd.to_string(),
        kind,
        formatted,
        e164: format!("+55{digits}"),
        digits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpf_check_digits() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("12345678909"));
        assert!(!is_valid_cpf("529.982.247-26"));
        assert!(!is_valid_cpf("1234567890"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn test_cpf_all_equal_digits_rejected() {
        for d in 0..=9 {
            let s = d.to_string().repeat(11);
            assert!(!is_valid_cpf(&s), "{s} should be invalid");
        }
    }

    #[test]
    fn test_cpf_second_digit_depends_on_first() {
        // Flipping only the last digit must always break validation.
        for last in 0..=9 {
            let candidate = format!("5299822472{last}");
            assert_eq!(is_valid_cpf(&candidate), last == 5);
        }
    }

    #[test]
    fn test_cnpj_check_digits() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cnpj("11222333000180"));
        assert!(!is_valid_cnpj("00000000000000"));
        assert!(!is_valid_cnpj("1122233300018"));
    }

    #[test]
    fn test_formatters() {
        assert_eq!(format_cpf("12345678909").as_deref(), Some("123.456.789-09"));
        assert_eq!(
            format_cnpj("11222333000181").as_deref(),
            Some("11.222.333/0001-81")
        );
        assert_eq!(format_cep("01001000").as_deref(), Some("01001-000"));
        assert_eq!(format_pis("12045698116").as_deref(), Some("120.45698.11-6"));
        assert!(format_cpf("123").is_none());
    }

    #[test]
    fn test_pis() {
        assert!(is_valid_pis("120.45698.11-6"));
        assert!(!is_valid_pis("12045698117"));
        assert!(!is_valid_pis("11111111111"));
        // Repeated digits are fine as long as the check digit matches
        assert!(is_valid_pis("00000000000"));
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email("fulano@example.com"));
        assert!(is_valid_email("  fulano@example.com "));
        assert!(!is_valid_email("fulano@example"));
        assert!(!is_valid_email("ful ano@example.com"));
        assert_eq!(normalize_email(" Fulano@Example.COM "), "fulano@example.com");
    }

    #[test]
    fn test_phone_mobile() {
        let info = parse_phone("11987654321").expect("valid mobile");
        assert_eq!(info.ddd, "11");
        assert_eq!(info.kind, PhoneKind::Celular);
        assert_eq!(info.formatted, "(11) 98765-4321");
        assert_eq!(info.e164, "+5511987654321");
    }

    #[test]
    fn test_phone_landline() {
        let info = parse_phone("1133334444").expect("valid landline");
        assert_eq!(info.ddd, "11");
        assert_eq!(info.kind, PhoneKind::Fixo);
        assert_eq!(info.formatted, "(11) 3333-4444");
    }

    #[test]
    fn test_phone_country_code_and_bad_lengths() {
        assert_eq!(
            phone_digits("+55 (21) 99999-0000").as_deref(),
            Some("21999990000")
        );
        assert!(phone_digits("123456789").is_none());
        assert!(phone_digits("123456789012").is_none());
        assert!(parse_phone("").is_none());
    }

    #[test]
    fn test_parse_phone_rejects_country_code() {
        assert!(parse_phone("5511987654321").is_none());
        assert!(parse_phone("+55 (11) 98765-4321").is_none());
        assert!(parse_phone("(11) 98765-4321").is_some());
    }
}
