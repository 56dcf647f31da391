//! Listing-page crawler for company directory sites.
//!
//! Fetches paginated listing pages politely, extracts one [`Record`] per
//! company block, and follows the numbered pagination until no successor
//! page exists or the site starts blocking us.
//!
//! [`Record`]: bizdir_core::Record

pub mod clean;
pub mod client;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod pagination;
pub mod phone;
pub mod rate_limit;

pub use client::{FetchedPage, PageClient};
pub use crawl::{crawl, CrawlOptions, CrawlReport, CrawlStop};
pub use error::ScraperError;
pub use extract::{extract_records, BlockTemplate, ExtractStrategy, Extraction};
pub use pagination::{
    collect_page_links, extract_page_number, page_number_with_marker, select_next_page, PageLink,
    LISTING_PATH_MARKER,
};
pub use phone::{extract_phones, normalize_phone};
pub use rate_limit::Politeness;
