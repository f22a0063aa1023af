//! Tax identifier masking and case number formatting
//!
//! Pure, total functions. Input of the wrong length yields `None`, never a
//! partial mask.

use regex::Regex;
use std::sync::OnceLock;

/// Digits in a CPF (natural person)
pub const PERSON_ID_DIGITS: usize = 11;

/// Digits in a CNPJ (legal person)
pub const ORG_ID_DIGITS: usize = 14;

/// Digits in a CNJ unified case number
pub const CASE_NUMBER_DIGITS: usize = 20;

fn case_number_re() -> &'static Regex {
    static CASE_NUMBER_RE: OnceLock<Regex> = OnceLock::new();
    CASE_NUMBER_RE.get_or_init(|| {
        Regex::new(r"^\d{7}-\d{2}\.\d{4}\.\d\.\d{2}\.\d{4}$").expect("valid case number regex")
    })
}

/// Keep only ASCII digits
pub fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Mask a CPF as `XXX.XXX.XXX-XX`
///
/// ```
/// use autos_normalizer::mask_person_id;
///
/// assert_eq!(mask_person_id("115.451.116-26").as_deref(), Some("115.451.116-26"));
/// assert_eq!(mask_person_id("11545111626").as_deref(), Some("115.451.116-26"));
/// assert_eq!(mask_person_id("1154511162"), None);
/// ```
pub fn mask_person_id(raw: &str) -> Option<String> {
    let d = digits(raw);
    if d.len() != PERSON_ID_DIGITS {
        return None;
    }
    Some(format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]))
}

/// Mask a CNPJ as `XX.XXX.XXX/XXXX-XX`
///
/// ```
/// use autos_normalizer::mask_org_id;
///
/// assert_eq!(mask_org_id("76535764000143").as_deref(), Some("76.535.764/0001-43"));
/// assert_eq!(mask_org_id("11545111626"), None);
/// ```
pub fn mask_org_id(raw: &str) -> Option<String> {
    let d = digits(raw);
    if d.len() != ORG_ID_DIGITS {
        return None;
    }
    Some(format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    ))
}

/// Format a case number as `NNNNNNN-NN.AAAA.N.NN.NNNN`
///
/// Input that does not carry exactly 20 digits is returned unchanged, so an
/// already formatted or foreign identifier passes through.
pub fn format_case_number(raw: &str) -> String {
    let d = digits(raw);
    if d.len() != CASE_NUMBER_DIGITS {
        return raw.to_string();
    }
    format!(
        "{}-{}.{}.{}.{}.{}",
        &d[0..7],
        &d[7..9],
        &d[9..13],
        &d[13..14],
        &d[14..16],
        &d[16..20]
    )
}

/// Whether `number` is in the exact unified CNJ format
pub fn is_valid_case_number(number: &str) -> bool {
    case_number_re().is_match(number)
}
