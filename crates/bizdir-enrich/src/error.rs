use bizdir_scraper::ScraperError;
use bizdir_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("search request failed: {0}")]
    Fetch(#[from] ScraperError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("record cannot be searched: {reason}")]
    InvalidRecord { reason: String },
}
