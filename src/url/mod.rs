//! URL handling module for Month-Links
//!
//! Pure helpers that decide where a link points and whether it may be
//! crawled: reference resolution, same-domain membership, and exclusion by
//! file extension or fragment.

mod domain;
mod exclude;
mod resolve;

// Re-export main functions
pub use domain::{extract_domain, is_same_domain};
pub use exclude::{is_excluded, ExcludedExtensions};
pub use resolve::resolve;

use url::Url;

/// Frontier admission decision for a discovered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClassification {
    /// Same-domain page that may be fetched
    Visitable,
    /// Same-domain link filtered out by extension or fragment
    Excluded,
    /// Link to another host
    External,
}

impl LinkClassification {
    /// Returns true if the link may enter the frontier
    pub fn should_crawl(&self) -> bool {
        matches!(self, Self::Visitable)
    }
}

/// Classifies a URL relative to the crawled host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use month_links::url::{classify_link, ExcludedExtensions, LinkClassification};
///
/// let excluded = ExcludedExtensions::default();
/// let url = Url::parse("https://example.com/a.pdf").unwrap();
/// assert_eq!(classify_link(&url, "example.com", &excluded), LinkClassification::Excluded);
/// ```
pub fn classify_link(url: &Url, domain_host: &str, excluded: &ExcludedExtensions) -> LinkClassification {
    if !is_same_domain(url, domain_host) {
        LinkClassification::External
    } else if is_excluded(url, excluded) {
        LinkClassification::Excluded
    } else {
        LinkClassification::Visitable
    }
}
