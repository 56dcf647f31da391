//! The business-directory record and its identity rules.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Placeholder stored in location fields the source page did not provide.
pub const NOT_AVAILABLE: &str = "Not available";

/// Phone sentinel written by older enrichment runs; never a real number.
pub const PHONE_NOT_FOUND: &str = "Not found";

/// One company as extracted from a listing page, optionally enriched with a
/// phone number.
///
/// Text fields default to an empty string when absent or `null` in an input
/// file so that records written by earlier tools load without error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub postal_code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub municipality: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub province: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub business_purpose: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub social_capital: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub start_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub coordinates: String,
    /// Absolute link to the company detail page.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_search_info: Option<String>,
    /// Unix seconds at which the phone lookup finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_timestamp: Option<f64>,
}

impl Record {
    /// Creates a record with only a company name and source URL set.
    #[must_use]
    pub fn new(company_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            company_name: company_name.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Assigns `value` to the field named by `field`, replacing any previous value.
    pub fn set_field(&mut self, field: CompanyField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CompanyField::StartDate => self.start_date = value,
            CompanyField::SocialCapital => self.social_capital = value,
            CompanyField::Coordinates => self.coordinates = value,
            CompanyField::Street => self.address = value,
            CompanyField::PostalCode => self.postal_code = value,
            CompanyField::Municipality => self.municipality = value,
            CompanyField::Province => self.province = value,
            CompanyField::BusinessPurpose => self.business_purpose = value,
        }
    }

    /// Identity key used for deduplication.
    #[must_use]
    pub fn key(&self) -> RecordKey {
        RecordKey {
            name: self.company_name.to_lowercase(),
            url: self.url.clone(),
        }
    }
}

/// The eight labelled fields a listing block may carry, in the order the
/// source site prints them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    StartDate,
    SocialCapital,
    Coordinates,
    Street,
    PostalCode,
    Municipality,
    Province,
    BusinessPurpose,
}

impl CompanyField {
    pub const ALL: [CompanyField; 8] = [
        CompanyField::StartDate,
        CompanyField::SocialCapital,
        CompanyField::Coordinates,
        CompanyField::Street,
        CompanyField::PostalCode,
        CompanyField::Municipality,
        CompanyField::Province,
        CompanyField::BusinessPurpose,
    ];

    /// The canonical (lowercase, Spanish) label printed on the listing page.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CompanyField::StartDate => "fecha inicio",
            CompanyField::SocialCapital => "capital social",
            CompanyField::Coordinates => "coordenadas",
            CompanyField::Street => "calle",
            CompanyField::PostalCode => "cp",
            CompanyField::Municipality => "municipio",
            CompanyField::Province => "provincia",
            CompanyField::BusinessPurpose => "objeto social",
        }
    }

    /// Maps label text such as `"Capital Social:"` to its field.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace and a
    /// trailing colon. Unknown labels return `None`.
    #[must_use]
    pub fn from_label(text: &str) -> Option<Self> {
        let canonical = text.trim().trim_end_matches(':').trim().to_lowercase();
        Self::ALL.into_iter().find(|f| f.label() == canonical)
    }
}

/// `(lowercased company_name, url)`; two records with equal keys are the
/// same company.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name: String,
    pub url: String,
}

/// Streaming first-seen-wins deduplication over [`RecordKey`]s.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<RecordKey>,
}

impl Deduplicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time a key is offered and `false` afterwards.
    pub fn admit(&mut self, record: &Record) -> bool {
        self.seen.insert(record.key())
    }

    /// Marks a key as already seen without admitting a record.
    pub fn mark_seen(&mut self, key: RecordKey) {
        self.seen.insert(key);
    }

    #[must_use]
    pub fn contains(&self, record: &Record) -> bool {
        self.seen.contains(&record.key())
    }
}

/// Drops every record whose key was already seen earlier in `records`.
#[must_use]
pub fn dedupe_records(records: Vec<Record>) -> Vec<Record> {
    let mut dedup = Deduplicator::new();
    records.into_iter().filter(|r| dedup.admit(r)).collect()
}

/// Reads a text field that older files may hold as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// `true` when the record carries a phone worth exporting.
#[must_use]
pub fn has_usable_phone(record: &Record) -> bool {
    record
        .phone
        .as_deref()
        .is_some_and(|p| !p.trim().is_empty() && p != PHONE_NOT_FOUND)
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
