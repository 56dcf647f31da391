//! Numbered pagination: ordinals from URLs and successor selection.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::client::resolve_url;

/// Path segment that precedes the page ordinal on listing URLs.
pub const LISTING_PATH_MARKER: &str = "empresas-creadas-hoy-en-espana";

static GENERIC_PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page[=/](\d+)").expect("valid regex"));

/// A pagination link and the ordinal of the page it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub page_number: u32,
    pub url: String,
}

/// Page ordinal of a listing URL.
///
/// Looks for `/empresas-creadas-hoy-en-espana/<n>`, then a generic
/// `page=<n>` or `page/<n>` token, and defaults to 1.
#[must_use]
pub fn extract_page_number(url: &str) -> u32 {
    page_number_with_marker(url, LISTING_PATH_MARKER)
}

/// [`extract_page_number`] for listings under a different path marker.
#[must_use]
pub fn page_number_with_marker(url: &str, marker: &str) -> u32 {
    let needle = format!("/{marker}/");
    let from_marker = url.match_indices(&needle).find_map(|(at, _)| {
        let rest = &url[at + needle.len()..];
        let digits: &str = &rest[..rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len())];
        digits.parse().ok()
    });
    if let Some(n) = from_marker {
        return n;
    }

    GENERIC_PAGE_RE
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(1)
}

/// Collects every anchor whose `href` contains `marker` and which has
/// visible text, resolved against `page_url`.
#[must_use]
pub fn collect_page_links(document: &Html, page_url: &str, marker: &str) -> Vec<PageLink> {
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&anchors)
        .filter(|a| !a.text().collect::<String>().trim().is_empty())
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(marker))
        .filter_map(|href| resolve_url(page_url, href))
        .map(|url| PageLink {
            page_number: page_number_with_marker(&url, marker),
            url,
        })
        .collect()
}

/// Chooses the successor of page `current` among `candidates`.
///
/// Prefers the link to `current + 1`; otherwise the lowest ordinal above
/// `current`. `None` when no candidate goes forward.
#[must_use]
pub fn select_next_page(current: u32, candidates: &[PageLink]) -> Option<&PageLink> {
    let forward = candidates.iter().filter(|link| link.page_number > current);
    let mut lowest: Option<&PageLink> = None;
    for link in forward {
        if Some(link.page_number) == current.checked_add(1) {
            return Some(link);
        }
        if lowest.is_none_or(|l| link.page_number < l.page_number) {
            lowest = Some(link);
        }
    }
    lowest
}
