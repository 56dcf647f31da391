//! Batched enrichment with a checkpoint after every batch.
//!
//! After each batch the full accumulated result list and its
//! [`EnrichmentStats`] are rewritten, so the output file is always a valid
//! snapshot of everything processed so far.

use std::path::PathBuf;
use std::time::Duration;

use bizdir_core::{Deduplicator, EnrichmentStats, ProgressEvent, ProgressSink, Record};
use bizdir_store::{save_records, save_stats, stats_path_for};

use crate::error::EnrichError;
use crate::search::SearchBackend;
use crate::strategy::find_phone;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub batch_size: usize,
    pub batch_pause: Duration,
    pub search_delay: Duration,
    /// Result file; stats go to its `_stats.json` sibling.
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Every result, prior ones first.
    pub results: Vec<Record>,
    pub stats: EnrichmentStats,
    /// Input records skipped because a prior result already covered them.
    pub skipped: usize,
}

/// Enriches `records` batch by batch, appending to `prior` results.
///
/// Input records whose key already appears in `prior` are skipped, which is
/// how an interrupted run resumes. A failure on one record is stored on that
/// record as `error: <message>` and the batch carries on.
///
/// # Errors
///
/// [`EnrichError::Store`] when a checkpoint cannot be written; the run stops
/// there, earlier checkpoints stay intact.
pub async fn run_batches<B>(
    backend: &B,
    records: Vec<Record>,
    prior: Vec<Record>,
    options: &BatchOptions,
    sink: &mut dyn ProgressSink,
) -> Result<BatchOutcome, EnrichError>
where
    B: SearchBackend + ?Sized,
{
    let mut seen = Deduplicator::new();
    for record in &prior {
        seen.mark_seen(record.key());
    }
    let total_input = records.len();
    let pending: Vec<Record> = records.into_iter().filter(|r| !seen.contains(r)).collect();
    let skipped = total_input - pending.len();
    if skipped > 0 {
        tracing::info!(skipped, "resuming: skipping records already processed");
    }

    let mut results = prior;
    let offset = results.len();
    let batch_size = options.batch_size.max(1);
    let batch_count = pending.len().div_ceil(batch_size);
    let stats_path = stats_path_for(&options.output);
    let mut stats = EnrichmentStats::from_results(&results, offset, offset);

    for (n, batch) in pending.chunks(batch_size).enumerate() {
        let start = offset + n * batch_size;
        let end = start + batch.len();
        tracing::info!(start, end, total = offset + pending.len(), "processing batch");

        for record in batch {
            results.push(enrich_one(backend, record.clone(), options.search_delay, sink).await);
        }

        stats = EnrichmentStats::from_results(&results, start, end);
        save_records(&options.output, &results)?;
        save_stats(&stats_path, &stats)?;
        sink.emit(&ProgressEvent::BatchCompleted {
            start,
            end,
            total_processed: stats.total_processed,
            phones_found: stats.phones_found,
        });

        let is_last = n + 1 == batch_count;
        if !is_last && !options.batch_pause.is_zero() {
            tokio::time::sleep(options.batch_pause).await;
        }
    }

    Ok(BatchOutcome {
        results,
        stats,
        skipped,
    })
}

async fn enrich_one<B>(
    backend: &B,
    mut record: Record,
    delay: Duration,
    sink: &mut dyn ProgressSink,
) -> Record
where
    B: SearchBackend + ?Sized,
{
    match find_phone(backend, &record, delay, sink).await {
        Ok(lookup) => {
            record.phone = lookup.phone;
            record.phone_search_info = Some(lookup.info);
            record.search_timestamp = Some(unix_seconds());
        }
        Err(e) => {
            let message = e.to_string();
            sink.emit(&ProgressEvent::LookupFailed {
                company: &record.company_name,
                error: &message,
            });
            tracing::warn!(company = %record.company_name, error = %message, "phone lookup failed");
            record.phone = None;
            record.phone_search_info = Some(format!("error: {message}"));
        }
    }
    record
}

#[allow(clippy::cast_precision_loss)]
fn unix_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
