use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("request to {requested} was redirected to anti-bot page {url}")]
    Blocked { requested: String, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ScraperError {
    /// `true` when the target site has started refusing us; crawls must stop.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, ScraperError::Blocked { .. })
    }
}
