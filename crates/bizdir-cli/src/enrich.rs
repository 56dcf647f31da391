//! `enrich` command handler.

use std::path::PathBuf;
use std::time::Duration;

use bizdir_core::{dedupe_records, AppConfig, ProgressSink};
use bizdir_enrich::{run_batches, BatchOptions, DuckDuckGoBackend};
use bizdir_store::load_records;

pub(crate) const DEFAULT_OUTPUT: &str = "companies_with_phones_enhanced.json";

#[derive(Debug)]
pub(crate) struct EnrichArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub batch_size: Option<usize>,
    pub limit: Option<usize>,
    pub resume: bool,
}

/// Runs the phone search over `args.input` in checkpointed batches.
///
/// # Errors
///
/// Fails when the input or (with `--resume`) the existing output cannot be
/// read, or a checkpoint cannot be written.
pub(crate) async fn run_enrich(
    config: &AppConfig,
    args: EnrichArgs,
    sink: &mut dyn ProgressSink,
) -> anyhow::Result<()> {
    let loaded = load_records(&args.input)?;
    let loaded_count = loaded.len();
    let mut records = dedupe_records(loaded);
    println!(
        "loaded {} companies from {} ({} duplicates dropped)",
        records.len(),
        args.input.display(),
        loaded_count - records.len()
    );
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let prior = if args.resume && args.output.exists() {
        let prior = load_records(&args.output)?;
        println!(
            "resuming from {} ({} already processed)",
            args.output.display(),
            prior.len()
        );
        prior
    } else {
        Vec::new()
    };

    let backend = DuckDuckGoBackend::new(
        config.search_url.clone(),
        config.search_timeout_secs,
        &config.user_agent,
        config.search_max_snippets,
    )?;
    let options = BatchOptions {
        batch_size: args.batch_size.unwrap_or(config.batch_size),
        batch_pause: Duration::from_millis(config.batch_pause_ms),
        search_delay: Duration::from_millis(config.search_delay_ms),
        output: args.output,
    };

    let outcome = run_batches(&backend, records, prior, &options, sink).await?;

    println!(
        "found {}/{} phone numbers ({:.2}% success rate); results in {}",
        outcome.stats.phones_found,
        outcome.stats.total_processed,
        outcome.stats.success_rate * 100.0,
        options.output.display()
    );
    Ok(())
}
