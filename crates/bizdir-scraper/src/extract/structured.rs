//! Structured block scan: a label/value state machine over each block's
//! `<p>` children.

use bizdir_core::{CompanyField, Record};
use scraper::{ElementRef, Html, Selector};

use crate::clean::collapse_whitespace;
use crate::client::resolve_url;

use super::BlockTemplate;

/// What one `<p>` inside a block contributes.
#[derive(Debug, PartialEq, Eq)]
enum Node {
    /// A label; `None` for labels that name no known field.
    Label(Option<CompanyField>),
    Value(String),
    Other,
}

/// Which field subsequent values are written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    NoField,
    Field(CompanyField),
}

/// Returns `None` when the page has no container matching the template, so
/// the caller can fall back to the flat scan.
pub(super) fn scan(
    document: &Html,
    page_url: &str,
    template: &BlockTemplate,
) -> Option<Vec<Record>> {
    let container = parse_selector(&template.container)?;
    let name_link = parse_selector(&template.name_link)?;
    let paragraph = parse_selector("p")?;

    let blocks: Vec<ElementRef<'_>> = document.select(&container).collect();
    if blocks.is_empty() {
        return None;
    }
    tracing::debug!(page_url, blocks = blocks.len(), "found company blocks");

    let records = blocks
        .into_iter()
        .map(|block| {
            scan_block(
                block,
                page_url,
                &name_link,
                &paragraph,
                &template.label_class,
            )
        })
        .collect();
    Some(records)
}

fn scan_block(
    block: ElementRef<'_>,
    page_url: &str,
    name_link: &Selector,
    paragraph: &Selector,
    label_class: &str,
) -> Record {
    let mut record = Record::default();

    if let Some(anchor) = block.select(name_link).next() {
        record.company_name = collapse_whitespace(&anchor.text().collect::<String>());
        record.url = anchor
            .value()
            .attr("href")
            .and_then(|href| resolve_url(page_url, href))
            .unwrap_or_default();
    }

    let mut cursor = Cursor::NoField;
    for p in block.select(paragraph) {
        match classify(p, label_class) {
            Node::Label(Some(field)) => cursor = Cursor::Field(field),
            Node::Label(None) => cursor = Cursor::NoField,
            Node::Value(text) => {
                if let Cursor::Field(field) = cursor {
                    record.set_field(field, text);
                }
            }
            Node::Other => {}
        }
    }

    record
}

fn classify(p: ElementRef<'_>, label_class: &str) -> Node {
    let text = collapse_whitespace(&p.text().collect::<String>());
    if text.is_empty() {
        return Node::Other;
    }
    if p.value().classes().any(|c| c == label_class) {
        Node::Label(CompanyField::from_label(&text))
    } else {
        Node::Value(text)
    }
}

fn parse_selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(selector = css, error = %e, "invalid block template selector");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_p(html: &str) -> Node {
        let fragment = Html::parse_fragment(html);
        let sel = Selector::parse("p").expect("valid selector");
        let p = fragment.select(&sel).next().expect("fixture has a <p>");
        classify(p, "filaPr")
    }

    #[test]
    fn classify_label_with_known_field() {
        assert_eq!(
            first_p(r#"<p class="filaPr">Capital Social</p>"#),
            Node::Label(Some(CompanyField::SocialCapital))
        );
    }

    #[test]
    fn classify_label_with_unknown_field() {
        assert_eq!(first_p(r#"<p class="filaPr">Teléfono</p>"#), Node::Label(None));
    }

    #[test]
    fn classify_value_collapses_whitespace() {
        assert_eq!(
            first_p("<p>  3000\n   EUR </p>"),
            Node::Value("3000 EUR".to_string())
        );
    }

    #[test]
    fn classify_empty_paragraph_is_other() {
        assert_eq!(first_p("<p>   </p>"), Node::Other);
    }
}
