use crate::{UrlError, UrlResult};
use url::Url;

/// Resolves a possibly-relative reference against the page it was found on
///
/// Handles relative paths, absolute paths, protocol-relative (`//host/...`)
/// and fully-qualified references using standard URL resolution. Only HTTP(S)
/// results with a non-empty host are accepted.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use month_links::url::resolve;
///
/// let base = Url::parse("https://example.com/blog/post").unwrap();
/// assert_eq!(resolve(&base, "other").unwrap().as_str(), "https://example.com/blog/other");
/// assert_eq!(resolve(&base, "/about").unwrap().as_str(), "https://example.com/about");
/// assert_eq!(resolve(&base, "//cdn.example.com/x").unwrap().as_str(), "https://cdn.example.com/x");
/// ```
pub fn resolve(base: &Url, href: &str) -> UrlResult<Url> {
    let resolved = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return Err(UrlError::InvalidScheme(resolved.scheme().to_string()));
    }

    match resolved.host_str() {
        Some(host) if !host.is_empty() => Ok(resolved),
        _ => Err(UrlError::MissingDomain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/news/2024/index.html").unwrap()
    }

    #[test]
    fn test_relative_path() {
        let url = resolve(&base(), "03/story").unwrap();
        assert_eq!(url.as_str(), "https://example.com/news/2024/03/story");
    }

    #[test]
    fn test_parent_path() {
        let url = resolve(&base(), "../archive").unwrap();
        assert_eq!(url.as_str(), "https://example.com/news/archive");
    }

    #[test]
    fn test_absolute_path() {
        let url = resolve(&base(), "/contact").unwrap();
        assert_eq!(url.as_str(), "https://example.com/contact");
    }

    #[test]
    fn test_protocol_relative() {
        let url = resolve(&base(), "//example.com/x").unwrap();
        assert_eq!(url.as_str(), "https://example.com/x");
    }

    #[test]
    fn test_fully_qualified() {
        let url = resolve(&base(), "http://other.org/page").unwrap();
        assert_eq!(url.as_str(), "http://other.org/page");
    }

    #[test]
    fn test_query_and_fragment_kept() {
        let url = resolve(&base(), "page?id=1#top").unwrap();
        assert_eq!(url.as_str(), "https://example.com/news/2024/page?id=1#top");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let url = resolve(&base(), "  /about  ").unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert!(matches!(
            resolve(&base(), "ftp://example.com/file").unwrap_err(),
            UrlError::InvalidScheme(_)
        ));
        assert!(resolve(&base(), "data:text/html,hi").is_err());
    }

    #[test]
    fn test_results_always_have_scheme_and_host() {
        for href in ["", "a", "/", "?q=1", "#frag", "..", "//example.com", "x/y/../z"] {
            let url = resolve(&base(), href).unwrap();
            assert!(!url.scheme().is_empty(), "no scheme for {:?}", href);
            assert!(
                url.host_str().map_or(false, |h| !h.is_empty()),
                "no host for {:?}",
                href
            );
        }
    }

    #[test]
    fn test_malformed_reference() {
        assert!(resolve(&base(), "http://[::1").is_err());
    }
}
