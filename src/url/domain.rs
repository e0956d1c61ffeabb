use url::Url;

/// Extracts the host of a URL, lowercased
///
/// # Examples
///
/// ```
/// use url::Url;
/// use month_links::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true iff the URL's host equals `domain_host` exactly
///
/// There is no subdomain matching: `blog.example.com` is a different domain
/// from `example.com`. Ports are not part of the host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use month_links::url::is_same_domain;
///
/// let url = Url::parse("https://example.com/a").unwrap();
/// assert!(is_same_domain(&url, "example.com"));
/// assert!(!is_same_domain(&url, "www.example.com"));
/// ```
pub fn is_same_domain(url: &Url, domain_host: &str) -> bool {
    url.host_str().map_or(false, |host| host == domain_host)
}
