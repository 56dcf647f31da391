//! CSV export of the records that carry a usable phone number.

use std::fs::File;
use std::path::Path;

use bizdir_core::{has_usable_phone, Deduplicator, Record};

use crate::error::StoreError;

pub const DEFAULT_EXPORT_PATH: &str = "companies_with_phones.csv";

pub const CSV_COLUMNS: [&str; 11] = [
    "company_name",
    "phone",
    "address",
    "postal_code",
    "municipality",
    "province",
    "business_purpose",
    "social_capital",
    "start_date",
    "coordinates",
    "url",
];

/// Counts reported after an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Rows written below the header.
    pub written: usize,
    /// Records in the input, before filtering.
    pub total: usize,
}

impl ExportSummary {
    /// Share of input records that were exported, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.written as f64 / self.total as f64 * 100.0
    }
}

/// Writes the header plus one row per deduplicated record with a usable
/// phone to `output`. Records without a company name are skipped.
///
/// The header is written even when no record qualifies.
///
/// # Errors
///
/// [`StoreError::Io`] if `output` cannot be created, [`StoreError::Csv`] on
/// write failure.
pub fn export_phone_csv(records: &[Record], output: &Path) -> Result<ExportSummary, StoreError> {
    let file = File::create(output).map_err(|e| StoreError::io(output, e))?;
    let mut wtr = csv::Writer::from_writer(file);
    let csv_err = |source: csv::Error| StoreError::Csv {
        path: output.to_path_buf(),
        source,
    };

    wtr.write_record(CSV_COLUMNS).map_err(csv_err)?;

    let mut dedup = Deduplicator::new();
    let mut written = 0;
    for record in records
        .iter()
        .filter(|r| has_usable_phone(r) && !r.company_name.trim().is_empty())
        .filter(|r| dedup.admit(r))
    {
        wtr.write_record(row(record)).map_err(csv_err)?;
        written += 1;
    }
    wtr.flush().map_err(|e| StoreError::io(output, e))?;

    let summary = ExportSummary {
        written,
        total: records.len(),
    };
    tracing::info!(
        path = %output.display(),
        written = summary.written,
        total = summary.total,
        "exported phone CSV"
    );
    Ok(summary)
}

fn row(record: &Record) -> [&str; 11] {
    [
        record.company_name.as_str(),
        record.phone.as_deref().unwrap_or_default(),
        record.address.as_str(),
        record.postal_code.as_str(),
        record.municipality.as_str(),
        record.province.as_str(),
        record.business_purpose.as_str(),
        record.social_capital.as_str(),
        record.start_date.as_str(),
        record.coordinates.as_str(),
        record.url.as_str(),
    ]
}
