use url::Url;

/// Case-insensitive set of file extensions that are never fetched
///
/// Extensions are stored lowercase with a leading dot so the check is a plain
/// suffix match on the lowercased path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedExtensions {
    suffixes: Vec<String>,
}

impl ExcludedExtensions {
    /// Builds the set from extensions given with or without their leading dot
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| format!(".{}", ext.as_ref().trim().trim_start_matches('.').to_lowercase()))
            .collect();
        Self { suffixes }
    }

    /// Returns true if the path ends with one of the excluded extensions
    pub fn matches_path(&self, path: &str) -> bool {
        let path = path.to_lowercase();
        self.suffixes.iter().any(|suffix| path.ends_with(suffix))
    }

    /// Number of configured extensions
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    /// Returns true if no extension is configured
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}

impl Default for ExcludedExtensions {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXCLUDED_EXTENSIONS)
    }
}

/// Returns true if a URL must never enter the frontier
///
/// A URL is excluded when its path ends with an excluded extension, or when a
/// `#` appears before any query component (a fragment-only variant of a page).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use month_links::url::{is_excluded, ExcludedExtensions};
///
/// let excluded = ExcludedExtensions::default();
/// let pdf = Url::parse("https://example.com/files/report.PDF").unwrap();
/// let page = Url::parse("https://example.com/2024/03/index.html").unwrap();
/// assert!(is_excluded(&pdf, &excluded));
/// assert!(!is_excluded(&page, &excluded));
/// ```
pub fn is_excluded(url: &Url, excluded: &ExcludedExtensions) -> bool {
    if excluded.matches_path(url.path()) {
        return true;
    }

    has_fragment_before_query(url.as_str())
}

/// Checks for a `#` marker in the part of the URL preceding the first `?`
fn has_fragment_before_query(url: &str) -> bool {
    url.split('?').next().map_or(false, |head| head.contains('#'))
}
