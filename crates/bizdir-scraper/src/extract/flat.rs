//! Flat text scan for pages without stable block markup.
//!
//! The page is reduced to its trimmed, non-empty text lines. A line directly
//! above a "Fecha inicio" line names a company; `Label: value` lines fill in
//! that company's fields; the "Objeto social" line is always last and closes
//! the record.

use bizdir_core::{CompanyField, Record};
use scraper::{Html, Node};

const COMPANY_NAME_MARKER: &str = "fecha inicio";

pub(super) fn scan(document: &Html, page_url: &str) -> Vec<Record> {
    let lines = text_lines(document);
    scan_lines(&lines, page_url)
}

fn scan_lines(lines: &[String], page_url: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current = Record::default();

    for (i, line) in lines.iter().enumerate() {
        let next_is_marker = lines
            .get(i + 1)
            .is_some_and(|next| next.to_lowercase().contains(COMPANY_NAME_MARKER));
        if next_is_marker {
            current.company_name.clone_from(line);
            page_url.clone_into(&mut current.url);
            continue;
        }

        let Some((field, value)) = split_labelled(line) else {
            continue;
        };
        current.set_field(field, value);

        if field == CompanyField::BusinessPurpose {
            let finished = std::mem::take(&mut current);
            if !finished.company_name.is_empty() {
                records.push(finished);
            }
        }
    }

    records
}

/// Splits `"Capital social: 3000 EUR"` into its field and trimmed value.
fn split_labelled(line: &str) -> Option<(CompanyField, &str)> {
    let (label, value) = line.split_once(':')?;
    let field = CompanyField::from_label(label)?;
    Some((field, value.trim()))
}

/// All text nodes outside `<script>`/`<style>`, trimmed, empties dropped.
fn text_lines(document: &Html) -> Vec<String> {
    document
        .tree
        .nodes()
        .filter_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            let in_code = node
                .parent()
                .and_then(|p| p.value().as_element().map(|e| e.name()))
                .is_some_and(|name| name == "script" || name == "style");
            if in_code {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}
