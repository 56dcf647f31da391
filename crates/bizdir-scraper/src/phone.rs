//! Spanish phone-number extraction from free text.
//!
//! Every pattern is applied to the whole text and all matches are pooled:
//! pattern order only affects the order of the returned list, never which
//! numbers are found. Callers that want a single number take the first.

use std::sync::LazyLock;

use regex::Regex;

const COUNTRY_CODE: &str = "34";

/// Minimum national digits (country code excluded) for a match to count.
const MIN_NATIONAL_DIGITS: usize = 8;

static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // +34 612 345 678 / +34-612-345-678
        r"\+34[\s\-]?\d{3}[\s\-]?\d{3}[\s\-]?\d{3}",
        // +34 91 234 56 78
        r"\+34[\s\-]?\d{2}[\s\-]?\d{3}[\s\-]?\d{2}[\s\-]?\d{2}",
        // 912 345 678
        r"\d{3}[\s\-]?\d{3}[\s\-]?\d{3}",
        // 91 234 56 78
        r"\d{2}[\s\-]?\d{3}[\s\-]?\d{2}[\s\-]?\d{2}",
        // 912 34 56 78
        r"\d{3}[\s\-]?\d{2}[\s\-]?\d{2}[\s\-]?\d{2}",
        // 612345678, 712345678, 812345678, 912345678
        r"[6-9]\d{8}",
    ]
    .into_iter()
    .map(|p| Regex::new(p).expect("valid phone regex"))
    .collect()
});

/// Returns every distinct normalized phone number found in `text`, in the
/// order they were first discovered.
#[must_use]
pub fn extract_phones(text: &str) -> Vec<String> {
    let mut phones: Vec<String> = Vec::new();
    for pattern in PHONE_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            let phone = normalize_phone(m.as_str());
            if national_digits(&phone) >= MIN_NATIONAL_DIGITS && !phones.contains(&phone) {
                phones.push(phone);
            }
        }
    }
    phones
}

/// Canonicalizes a raw match to `+34XXXXXXXXX` where possible.
///
/// Strips everything but digits and `+`; a bare 9-digit number starting with
/// 6–9 gains the `+34` prefix, and an 11-digit `34…` number gains the `+`.
/// Anything else is returned stripped but otherwise untouched. Idempotent.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if cleaned.starts_with(COUNTRY_CODE) && cleaned.len() == 11 {
        format!("+{cleaned}")
    } else if cleaned.len() == 9 && cleaned.starts_with(['6', '7', '8', '9']) {
        format!("+{COUNTRY_CODE}{cleaned}")
    } else {
        cleaned
    }
}

fn national_digits(phone: &str) -> usize {
    let national = phone
        .strip_prefix('+')
        .and_then(|p| p.strip_prefix(COUNTRY_CODE))
        .unwrap_or(phone);
    national.chars().filter(char::is_ascii_digit).count()
}
