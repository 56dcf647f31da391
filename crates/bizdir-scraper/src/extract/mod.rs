//! Company-block extraction from listing pages.
//!
//! Two strategies exist. The structured scan walks repeated container
//! elements described by a [`BlockTemplate`]; the flat scan reads the page as
//! plain text lines and is used only when no container is found.

mod flat;
mod structured;

use bizdir_core::Record;
use scraper::Html;

use crate::clean::clean_record;

/// CSS signature of one company block on a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTemplate {
    /// Selector for the repeated block container.
    pub container: String,
    /// Selector (inside the container) for the anchor carrying the company
    /// name and detail link.
    pub name_link: String,
    /// Class marking a `<p>` as a field label rather than a value.
    pub label_class: String,
}

impl Default for BlockTemplate {
    fn default() -> Self {
        Self {
            container: "div.bloq-empr-nueva".to_string(),
            name_link: ".nom-empr a".to_string(),
            label_class: "filaPr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    Structured,
    FlatText,
}

impl ExtractStrategy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractStrategy::Structured => "structured",
            ExtractStrategy::FlatText => "flat_text",
        }
    }
}

/// Records found on one page and the strategy that produced them.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<Record>,
    pub strategy: ExtractStrategy,
}

/// Extracts cleaned records from a listing page body.
///
/// `page_url` is the page's own (final) URL; detail links are resolved
/// against it. Blocks without a company name are dropped silently. A page
/// with no recognizable structure yields an empty list.
#[must_use]
pub fn extract_records(body: &str, page_url: &str, template: &BlockTemplate) -> Extraction {
    let document = Html::parse_document(body);
    extract_from_document(&document, page_url, template)
}

pub(crate) fn extract_from_document(
    document: &Html,
    page_url: &str,
    template: &BlockTemplate,
) -> Extraction {
    let (raw, strategy) = match structured::scan(document, page_url, template) {
        Some(records) => (records, ExtractStrategy::Structured),
        None => (flat::scan(document, page_url), ExtractStrategy::FlatText),
    };

    let records: Vec<Record> = raw
        .into_iter()
        .filter_map(|r| clean_record(r, page_url))
        .collect();

    if records.is_empty() {
        tracing::warn!(
            page_url,
            strategy = strategy.as_str(),
            "no company records extracted from page"
        );
    }

    Extraction { records, strategy }
}
