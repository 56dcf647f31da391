//! Human-readable progress lines on stdout.

use bizdir_core::{ProgressEvent, ProgressSink};

#[derive(Debug, Default)]
pub(crate) struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&mut self, event: &ProgressEvent<'_>) {
        if let ProgressEvent::StrategyAttempt {
            company,
            strategy,
            query,
        } = *event
        {
            tracing::debug!(company, strategy, query, "trying search strategy");
        }
        if let Some(line) = render(event) {
            println!("{line}");
        }
    }
}

/// `None` for events too chatty for the console; `emit` logs those at
/// `debug` instead.
fn render(event: &ProgressEvent<'_>) -> Option<String> {
    let line = match *event {
        ProgressEvent::PageFetched { url, page_number } => {
            format!("page {page_number}: {url}")
        }
        ProgressEvent::RecordsExtracted {
            page_number,
            count,
            strategy,
        } => format!("page {page_number}: {count} companies ({strategy})"),
        ProgressEvent::CrawlStopped {
            pages_visited,
            records,
            reason,
        } => format!("crawl stopped after {pages_visited} pages, {records} companies: {reason}"),
        ProgressEvent::StrategyAttempt { .. } => return None,
        ProgressEvent::PhoneFound { company, phone, .. } => format!("✓ {company}: {phone}"),
        ProgressEvent::PhoneNotFound { company } => format!("✗ {company}: no phone"),
        ProgressEvent::LookupFailed { company, error } => format!("! {company}: {error}"),
        ProgressEvent::BatchCompleted {
            start,
            end,
            total_processed,
            phones_found,
        } => format!(
            "batch {start}-{end} done: {phones_found}/{total_processed} phone numbers so far"
        ),
    };
    Some(line)
}
