//! DuckDuckGo's JavaScript-free HTML results page.

use std::sync::LazyLock;

use bizdir_scraper::{extract_phones, PageClient, Politeness};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use scraper::{Html, Selector};

use super::{SearchBackend, SearchResult};
use crate::error::EnrichError;

static SNIPPET_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.result__snippet").expect("valid selector"));

const SNIPPET_CHARS: usize = 200;

pub struct DuckDuckGoBackend {
    client: PageClient,
    endpoint: String,
    max_snippets: usize,
}

impl DuckDuckGoBackend {
    /// Builds a backend against `endpoint` (normally
    /// `https://html.duckduckgo.com/html/`).
    ///
    /// The client applies no politeness delay of its own; the strategy
    /// runner spaces queries.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::Fetch`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        timeout_secs: u64,
        user_agent: &str,
        max_snippets: usize,
    ) -> Result<Self, EnrichError> {
        Ok(Self {
            client: PageClient::new(timeout_secs, user_agent, Politeness::none())?,
            endpoint: endpoint.into(),
            max_snippets,
        })
    }

    fn query_url(&self, query: &str) -> String {
        let sep = if self.endpoint.contains('?') { '&' } else { '?' };
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
        format!("{}{sep}q={encoded}", self.endpoint)
    }
}

impl SearchBackend for DuckDuckGoBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, EnrichError> {
        let page = self.client.fetch(&self.query_url(query)).await?;
        let results = parse_snippets(&page.body, self.max_snippets);
        tracing::debug!(query, snippets = results.len(), "search results parsed");
        Ok(results)
    }
}

/// Extracts up to `max` snippets, tags stripped, each scanned for phones
/// before truncation.
fn parse_snippets(body: &str, max: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(body);
    document
        .select(&SNIPPET_SELECTOR)
        .take(max)
        .map(|a| {
            let raw: String = a.text().collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            let phone_found = extract_phones(&text).into_iter().next();
            SearchResult {
                snippet: text.chars().take(SNIPPET_CHARS).collect(),
                phone_found,
            }
        })
        .collect()
}
