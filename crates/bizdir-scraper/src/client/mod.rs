//! Polite HTTP client for listing and search pages.

mod origin;

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::rate_limit::{Politeness, RequestGate};

pub use origin::{extract_domain, resolve_url};

/// Substrings of a final (post-redirect) URL's host or path that mean the
/// site served an anti-bot page instead of content.
const SOFT_BLOCK_MARKERS: [&str; 3] = ["abuse", "captcha", "/sorry/"];

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against this.
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// HTTP client that presents a browser identity and enforces a
/// [`Politeness`] policy.
///
/// Requests are never retried: a timeout or non-2xx response is returned as a
/// [`ScraperError`] and the caller decides what happens to the crawl.
pub struct PageClient {
    client: Client,
    gate: RequestGate,
}

impl PageClient {
    /// Creates a `PageClient` with the given timeout, `User-Agent`, and
    /// politeness policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        politeness: Politeness,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            gate: RequestGate::new(politeness),
        })
    }

    /// Fetches `url` once, waiting for the politeness gap first.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`]: `url` does not parse.
    /// - [`ScraperError::Blocked`]: the response landed on an anti-bot page.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Http`]: network failure or timeout.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, ScraperError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let host = parsed.host_str().unwrap_or_default().to_owned();

        let slot = self.gate.acquire(&host).await;
        let result = self.send(parsed).await;
        slot.finish();

        let page = result?;
        tracing::debug!(url, final_url = %page.url, status = page.status, "fetched page");
        Ok(page)
    }

    async fn send(&self, url: reqwest::Url) -> Result<FetchedPage, ScraperError> {
        let requested = url.to_string();
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(
                reqwest::header::ACCEPT_LANGUAGE,
                "es-ES,es;q=0.8,en-US;q=0.5,en;q=0.3",
            )
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let final_url = response.url().to_string();
        if is_soft_block(response.url()) {
            tracing::error!(requested, final_url, "redirected to anti-bot page");
            return Err(ScraperError::Blocked {
                requested,
                url: final_url,
            });
        }

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: final_url,
            });
        }

        let body = response.text().await?;
        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// `true` when `final_url` points at a known anti-bot landing page.
///
/// Only host and path are checked; the query string carries caller input
/// such as search terms.
fn is_soft_block(final_url: &reqwest::Url) -> bool {
    let location = format!(
        "{}{}",
        final_url.host_str().unwrap_or_default(),
        final_url.path()
    )
    .to_ascii_lowercase();
    SOFT_BLOCK_MARKERS.iter().any(|m| location.contains(m))
}
