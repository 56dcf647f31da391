//! `crawl` command handler.

use std::path::Path;

use bizdir_core::{AppConfig, ProgressSink};
use bizdir_scraper::{crawl, CrawlOptions, CrawlStop, PageClient, Politeness};
use bizdir_store::{save_records, save_stats, stats_path_for};

pub(crate) const DEFAULT_OUTPUT: &str = "datoscif_companies.json";

/// Crawls the listing and writes records plus crawl stats.
///
/// Whatever was collected is saved even when the crawl stops early.
///
/// # Errors
///
/// Fails when the client cannot be built, the output cannot be written, or
/// the site blocked the crawl (after saving).
pub(crate) async fn run_crawl(
    config: &AppConfig,
    start_url: Option<String>,
    output: &Path,
    max_pages: Option<usize>,
    sink: &mut dyn ProgressSink,
) -> anyhow::Result<()> {
    let client = PageClient::new(
        config.request_timeout_secs,
        &config.user_agent,
        Politeness::new(config.crawl_delay_ms, config.crawl_randomize_delay),
    )
    .map_err(|e| anyhow::anyhow!("failed to build HTTP client: {e}"))?;

    let options = CrawlOptions::new(
        start_url.unwrap_or_else(|| config.start_url.clone()),
        max_pages.unwrap_or(config.crawl_max_pages),
    );

    let report = crawl(&client, &options, sink).await;

    save_records(output, &report.records)?;
    let stats_path = stats_path_for(output);
    save_stats(&stats_path, &report.stats)?;
    println!(
        "saved {} companies to {} ({} with address); stats in {}",
        report.stats.total_items,
        output.display(),
        report.stats.items_with_address,
        stats_path.display()
    );

    match report.stop {
        CrawlStop::Blocked { url } => {
            anyhow::bail!("crawl blocked by target site at {url}; partial results saved")
        }
        CrawlStop::FetchFailed { url, reason } => {
            tracing::warn!(url, reason, "crawl ended on a failed fetch");
            Ok(())
        }
        CrawlStop::Exhausted | CrawlStop::PageLimit { .. } => Ok(()),
    }
}
