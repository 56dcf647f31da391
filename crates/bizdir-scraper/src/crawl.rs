//! The pagination-following crawl loop.

use std::collections::HashSet;

use bizdir_core::{CrawlStats, Deduplicator, ProgressEvent, ProgressSink, Record};
use scraper::Html;

use crate::client::{extract_domain, FetchedPage, PageClient};
use crate::error::ScraperError;
use crate::extract::{extract_from_document, BlockTemplate, Extraction};
use crate::pagination::{
    collect_page_links, page_number_with_marker, select_next_page, PageLink, LISTING_PATH_MARKER,
};

/// Parameters of one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub start_url: String,
    /// Hard stop on the number of pages fetched.
    pub max_pages: usize,
    pub template: BlockTemplate,
    /// Only links whose `href` contains this marker count as pagination.
    pub link_marker: String,
}

impl CrawlOptions {
    #[must_use]
    pub fn new(start_url: impl Into<String>, max_pages: usize) -> Self {
        Self {
            start_url: start_url.into(),
            max_pages,
            template: BlockTemplate::default(),
            link_marker: LISTING_PATH_MARKER.to_string(),
        }
    }
}

/// Why a crawl ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlStop {
    /// The last page had no forward pagination link.
    Exhausted,
    /// The site redirected us to an anti-bot page.
    Blocked { url: String },
    FetchFailed { url: String, reason: String },
    PageLimit { max_pages: usize },
}

impl CrawlStop {
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            CrawlStop::Exhausted => "no further pages".to_string(),
            CrawlStop::Blocked { url } => format!("blocked at {url}"),
            CrawlStop::FetchFailed { url, reason } => format!("fetch of {url} failed: {reason}"),
            CrawlStop::PageLimit { max_pages } => format!("page limit of {max_pages} reached"),
        }
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, CrawlStop::Blocked { .. })
    }
}

/// Everything a crawl collected, including a partial prefix when it stopped
/// early.
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub records: Vec<Record>,
    pub stats: CrawlStats,
    pub stop: CrawlStop,
}

/// What one fetched page contributes: its records and its forward links.
struct PageOutcome {
    page_number: u32,
    extraction: Extraction,
    links: Vec<PageLink>,
}

/// Walks listing pages from `options.start_url` until no successor page
/// exists, the page limit is hit, or a fetch fails.
///
/// Never fails outright: fetch errors end the walk and are reported in
/// [`CrawlReport::stop`] alongside the records gathered so far. No URL is
/// requested twice.
pub async fn crawl(
    client: &PageClient,
    options: &CrawlOptions,
    sink: &mut dyn ProgressSink,
) -> CrawlReport {
    let mut visited: HashSet<String> = HashSet::new();
    let mut dedup = Deduplicator::new();
    let mut records = Vec::new();
    let mut stats = CrawlStats::default();
    let mut next_url = Some(options.start_url.clone());

    tracing::info!(
        domain = %extract_domain(&options.start_url),
        max_pages = options.max_pages,
        "starting crawl"
    );

    let stop = loop {
        let Some(url) = next_url.take() else {
            break CrawlStop::Exhausted;
        };
        if stats.pages_visited >= options.max_pages {
            break CrawlStop::PageLimit {
                max_pages: options.max_pages,
            };
        }
        if !visited.insert(url.clone()) {
            tracing::debug!(url, "pagination points back to a visited page");
            break CrawlStop::Exhausted;
        }

        let page = match client.fetch(&url).await {
            Ok(page) => page,
            Err(ScraperError::Blocked { url: landed, .. }) => {
                tracing::warn!(requested = url, landed, "crawl blocked by target site");
                break CrawlStop::Blocked { url: landed };
            }
            Err(e) => {
                tracing::warn!(url, error = %e, "listing fetch failed");
                break CrawlStop::FetchFailed {
                    url,
                    reason: e.to_string(),
                };
            }
        };
        visited.insert(page.url.clone());
        stats.pages_visited += 1;

        let outcome = process_page(&page, options);
        sink.emit(&ProgressEvent::PageFetched {
            url: &page.url,
            page_number: outcome.page_number,
        });

        let mut admitted = 0;
        for record in outcome.extraction.records {
            if dedup.admit(&record) {
                stats.observe(&record);
                records.push(record);
                admitted += 1;
            }
        }
        sink.emit(&ProgressEvent::RecordsExtracted {
            page_number: outcome.page_number,
            count: admitted,
            strategy: outcome.extraction.strategy.as_str(),
        });

        next_url = select_next_page(outcome.page_number, &outcome.links).map(|l| l.url.clone());
    };

    let reason = stop.reason();
    sink.emit(&ProgressEvent::CrawlStopped {
        pages_visited: stats.pages_visited,
        records: records.len(),
        reason: &reason,
    });
    tracing::info!(
        pages = stats.pages_visited,
        records = records.len(),
        reason,
        "crawl finished"
    );

    CrawlReport {
        records,
        stats,
        stop,
    }
}

/// Parses one page. Kept synchronous so the non-`Send` DOM never lives
/// across an await point.
fn process_page(page: &FetchedPage, options: &CrawlOptions) -> PageOutcome {
    let document = Html::parse_document(&page.body);
    let extraction = extract_from_document(&document, &page.url, &options.template);
    let links = collect_page_links(&document, &page.url, &options.link_marker);
    PageOutcome {
        page_number: page_number_with_marker(&page.url, &options.link_marker),
        extraction,
        links,
    }
}
