//! Summary statistics persisted next to crawl and enrichment output.

use serde::{Deserialize, Serialize};

use crate::record::{has_usable_phone, Record, NOT_AVAILABLE};

/// Running totals for an enrichment job, rewritten after every batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentStats {
    pub total_processed: usize,
    pub phones_found: usize,
    /// `phones_found / total_processed`, `0.0` when nothing was processed.
    pub success_rate: f64,
    /// Half-open index range of the most recent batch, e.g. `"20-40"`.
    pub last_processed_batch: String,
}

impl EnrichmentStats {
    /// Computes stats over the full accumulated result list.
    #[must_use]
    pub fn from_results(results: &[Record], batch_start: usize, batch_end: usize) -> Self {
        let total_processed = results.len();
        let phones_found = results.iter().filter(|r| has_usable_phone(r)).count();
        #[allow(clippy::cast_precision_loss)]
        let success_rate = if total_processed == 0 {
            0.0
        } else {
            phones_found as f64 / total_processed as f64
        };
        Self {
            total_processed,
            phones_found,
            success_rate,
            last_processed_batch: format!("{batch_start}-{batch_end}"),
        }
    }
}

/// Counters accumulated while walking listing pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub pages_visited: usize,
    pub total_items: usize,
    pub items_with_phone: usize,
    pub items_with_address: usize,
}

impl CrawlStats {
    /// Counts one emitted record.
    pub fn observe(&mut self, record: &Record) {
        self.total_items += 1;
        if has_usable_phone(record) {
            self.items_with_phone += 1;
        }
        if !record.address.is_empty() && record.address != NOT_AVAILABLE {
            self.items_with_address += 1;
        }
    }
}
