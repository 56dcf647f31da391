//! Search backends queried by the phone strategy runner.

mod duckduckgo;

use std::future::Future;

use crate::error::EnrichError;

pub use duckduckgo::DuckDuckGoBackend;

/// One result snippet and the first phone number found in it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub snippet: String,
    pub phone_found: Option<String>,
}

/// Submits a query string and returns a handful of result snippets.
pub trait SearchBackend {
    /// # Errors
    ///
    /// Any transport or backend failure. Callers treat it as an empty result.
    fn search(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<SearchResult>, EnrichError>> + Send;
}
