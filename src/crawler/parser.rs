//! HTML parser for extracting same-domain links
//!
//! Only anchor elements are considered. Each `href` is trimmed, non
//! navigational schemes are dropped, the rest is resolved against the page
//! URL and kept when it stays on the crawled host.

use crate::url::{is_same_domain, resolve};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Schemes that never lead to a page
const NON_NAVIGATIONAL_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Parses an HTML document
pub fn parse_html(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts the same-domain links referenced by anchor elements
///
/// The result is deduplicated and keeps the document order of first
/// appearance, so breadth-first traversal stays deterministic. No crawl state
/// is touched.
///
/// # Example
///
/// ```
/// use month_links::crawler::{extract_links, parse_html};
/// use url::Url;
///
/// let html = r#"<a href="/2024/03/">Mars</a><a href="https://other.com/">Out</a>"#;
/// let source = Url::parse("https://example.com/").unwrap();
/// let links = extract_links(&parse_html(html), &source, "example.com");
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://example.com/2024/03/");
/// ```
pub fn extract_links(document: &Html, source_url: &Url, domain_host: &str) -> Vec<Url> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(absolute_url) = resolve_link(href, source_url) else {
            continue;
        };

        if !is_same_domain(&absolute_url, domain_host) {
            continue;
        }

        if seen.insert(absolute_url.clone()) {
            links.push(absolute_url);
        }
    }

    links
}

/// Convenience function for extracting links straight from HTML text
pub fn extract_links_from_html(html: &str, source_url: &Url, domain_host: &str) -> Vec<Url> {
    extract_links(&parse_html(html), source_url, domain_host)
}

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be skipped:
/// - empty after trimming
/// - javascript:, mailto:, tel: schemes
/// - references that do not resolve to an HTTP(S) URL with a host
fn resolve_link(href: &str, source_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if NON_NAVIGATIONAL_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        return None;
    }

    match resolve(source_url, href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::trace!("Skipping href {:?} on {}: {}", href, source_url, e);
            None
        }
    }
}
