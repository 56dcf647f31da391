//! Post-extraction cleaning applied to every record before it leaves the
//! crawl.

use bizdir_core::{Record, NOT_AVAILABLE};

use crate::client::resolve_url;

/// Collapses every run of whitespace to a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes an extracted record.
///
/// Returns `None` when the company name is blank; such blocks are not
/// companies. Empty location fields become [`NOT_AVAILABLE`], the address is
/// whitespace-collapsed, and a missing or relative `url` is resolved against
/// `page_url`.
#[must_use]
pub fn clean_record(mut record: Record, page_url: &str) -> Option<Record> {
    let name = record.company_name.trim();
    if name.is_empty() {
        tracing::debug!(page_url, "dropping block without company name");
        return None;
    }
    record.company_name = name.to_string();

    record.address = or_not_available(collapse_whitespace(&record.address));
    for field in [
        &mut record.postal_code,
        &mut record.municipality,
        &mut record.province,
    ] {
        *field = or_not_available(field.trim().to_string());
    }
    for field in [
        &mut record.business_purpose,
        &mut record.social_capital,
        &mut record.start_date,
        &mut record.coordinates,
    ] {
        *field = field.trim().to_string();
    }

    let url = record.url.trim();
    record.url = if url.is_empty() {
        page_url.to_string()
    } else {
        resolve_url(page_url, url).unwrap_or_else(|| url.to_string())
    };

    Some(record)
}

fn or_not_available(value: String) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}
