//! The ordered query strategies tried for one record.

use std::time::Duration;

use bizdir_core::{has_usable_phone, ProgressEvent, ProgressSink, Record, NOT_AVAILABLE};

use crate::error::EnrichError;
use crate::search::SearchBackend;

pub const INFO_ALREADY_PRESENT: &str = "phone already present";
pub const INFO_NOT_FOUND: &str = "no phone found after all strategies";

/// Outcome of one record's phone search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneLookup {
    pub phone: Option<String>,
    /// Provenance, e.g. `"found via strategy 2"`.
    pub info: String,
}

/// The five query strings for `record`, most specific first.
///
/// Placeholder location values are left out rather than searched for.
#[must_use]
pub fn build_queries(record: &Record) -> Vec<String> {
    let name = record.company_name.trim();
    let municipality = searchable(&record.municipality);
    let province = searchable(&record.province);

    [
        format!("\"{name}\" {municipality} teléfono contacto"),
        format!("\"{name}\" {municipality} {province} teléfono"),
        format!("{name} {municipality} contacto phone"),
        format!("\"{name}\" Spain contact phone"),
        format!("{name} {municipality} {province} empresa"),
    ]
    .iter()
    .map(|q| q.split_whitespace().collect::<Vec<_>>().join(" "))
    .collect()
}

fn searchable(value: &str) -> &str {
    let value = value.trim();
    if value == NOT_AVAILABLE {
        ""
    } else {
        value
    }
}

/// Runs the query strategies in order and stops at the first snippet that
/// yields a phone.
///
/// Backend errors count as an empty result for that query. `delay` is slept
/// after every query, hit or miss, so consecutive lookups never reach the
/// backend back to back. Records that already carry a usable phone are
/// returned unchanged without searching.
///
/// # Errors
///
/// [`EnrichError::InvalidRecord`] when the record has no company name.
pub async fn find_phone<B>(
    backend: &B,
    record: &Record,
    delay: Duration,
    sink: &mut dyn ProgressSink,
) -> Result<PhoneLookup, EnrichError>
where
    B: SearchBackend + ?Sized,
{
    let company = record.company_name.trim();
    if company.is_empty() {
        return Err(EnrichError::InvalidRecord {
            reason: "company name is empty".to_string(),
        });
    }
    if has_usable_phone(record) {
        return Ok(PhoneLookup {
            phone: record.phone.clone(),
            info: INFO_ALREADY_PRESENT.to_string(),
        });
    }

    for (i, query) in build_queries(record).iter().enumerate() {
        let strategy = i + 1;
        sink.emit(&ProgressEvent::StrategyAttempt {
            company,
            strategy,
            query: query.as_str(),
        });

        let outcome = backend.search(query).await;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let results = match outcome {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(company, strategy, error = %e, "search query failed");
                continue;
            }
        };

        if let Some(phone) = results.into_iter().find_map(|r| r.phone_found) {
            sink.emit(&ProgressEvent::PhoneFound {
                company,
                phone: &phone,
                strategy,
            });
            return Ok(PhoneLookup {
                phone: Some(phone),
                info: format!("found via strategy {strategy}"),
            });
        }
    }

    sink.emit(&ProgressEvent::PhoneNotFound { company });
    Ok(PhoneLookup {
        phone: None,
        info: INFO_NOT_FOUND.to_string(),
    })
}
