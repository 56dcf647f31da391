//! URL helpers shared by the extractor and the pagination walker.

/// Resolves `href` against `base`, returning an absolute URL.
///
/// Absolute hrefs pass through unchanged. Returns `None` when `base` does not
/// parse or the join fails; fragment-only and `javascript:` links are
/// rejected.
#[must_use]
pub fn resolve_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') || href.starts_with("javascript:") {
        return None;
    }
    let base = reqwest::Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Extracts the hostname from a URL for log fields.
///
/// Falls back to the full URL string if parsing fails.
#[must_use]
pub fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_root_relative_href() {
        assert_eq!(
            resolve_url(
                "https://www.datoscif.es/empresas-nuevas/empresas-creadas-hoy-en-espana/",
                "/empresa/acme-sl"
            )
            .as_deref(),
            Some("https://www.datoscif.es/empresa/acme-sl")
        );
    }

    #[test]
    fn resolves_path_relative_href() {
        assert_eq!(
            resolve_url("https://example.es/listado/", "2").as_deref(),
            Some("https://example.es/listado/2")
        );
    }

    #[test]
    fn keeps_absolute_href() {
        assert_eq!(
            resolve_url("https://example.es/", "https://other.es/x").as_deref(),
            Some("https://other.es/x")
        );
    }

    #[test]
    fn rejects_fragment_and_script_links() {
        assert!(resolve_url("https://example.es/", "#top").is_none());
        assert!(resolve_url("https://example.es/", "javascript:void(0)").is_none());
        assert!(resolve_url("https://example.es/", "   ").is_none());
    }

    #[test]
    fn rejects_unparseable_base() {
        assert!(resolve_url("not a url", "/x").is_none());
    }

    #[test]
    fn extract_domain_falls_back_to_input() {
        assert_eq!(extract_domain("https://www.datoscif.es/a"), "www.datoscif.es");
        assert_eq!(extract_domain("garbage"), "garbage");
    }
}
