//! Progress reporting for long-running crawl and enrichment jobs.
//!
//! Library code never installs a logger; it reports through a caller-supplied
//! [`ProgressSink`]. Frontends decide whether events become log lines,
//! console output, or nothing at all.

/// A structured progress event.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent<'a> {
    PageFetched {
        url: &'a str,
        page_number: u32,
    },
    RecordsExtracted {
        page_number: u32,
        count: usize,
        strategy: &'a str,
    },
    CrawlStopped {
        pages_visited: usize,
        records: usize,
        reason: &'a str,
    },
    StrategyAttempt {
        company: &'a str,
        strategy: usize,
        query: &'a str,
    },
    PhoneFound {
        company: &'a str,
        phone: &'a str,
        strategy: usize,
    },
    PhoneNotFound {
        company: &'a str,
    },
    LookupFailed {
        company: &'a str,
        error: &'a str,
    },
    BatchCompleted {
        start: usize,
        end: usize,
        total_processed: usize,
        phones_found: usize,
    },
}

/// Receives [`ProgressEvent`]s.
pub trait ProgressSink {
    fn emit(&mut self, event: &ProgressEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&mut self, _event: &ProgressEvent<'_>) {}
}

/// Forwards events to `tracing` at `info` (successes) or `warn` (failures).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn emit(&mut self, event: &ProgressEvent<'_>) {
        match *event {
            ProgressEvent::PageFetched { url, page_number } => {
                tracing::info!(page = page_number, url, "fetched listing page");
            }
            ProgressEvent::RecordsExtracted {
                page_number,
                count,
                strategy,
            } => {
                tracing::info!(page = page_number, count, strategy, "extracted records");
            }
            ProgressEvent::CrawlStopped {
                pages_visited,
                records,
                reason,
            } => {
                tracing::info!(pages_visited, records, reason, "crawl stopped");
            }
            ProgressEvent::StrategyAttempt {
                company,
                strategy,
                query,
            } => {
                tracing::debug!(company, strategy, query, "phone search strategy");
            }
            ProgressEvent::PhoneFound {
                company,
                phone,
                strategy,
            } => {
                tracing::info!(company, phone, strategy, "phone found");
            }
            ProgressEvent::PhoneNotFound { company } => {
                tracing::info!(company, "no phone found");
            }
            ProgressEvent::LookupFailed { company, error } => {
                tracing::warn!(company, error, "phone lookup failed");
            }
            ProgressEvent::BatchCompleted {
                start,
                end,
                total_processed,
                phones_found,
            } => {
                tracing::info!(start, end, total_processed, phones_found, "batch completed");
            }
        }
    }
}
