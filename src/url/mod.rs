//! URL handling for the crawler
//!
//! This module owns the two URL decisions the crawler makes for every href:
//! - normalization into the canonical string form used as the visited-set key
//! - validity filtering against the crawl domain and pattern lists

mod filter;
mod normalize;

use url::Url;

// Re-export main types
pub use filter::UrlFilter;
pub use normalize::normalize_url;

/// Extracts the crawl domain from a parsed URL
///
/// The domain is the lower-cased host name. Ports are not part of the
/// domain, so two servers on different ports of one host compare equal.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitescribe::url::extract_domain;
///
/// let url = Url::parse("https://Docs.Example.COM:8443/guide").unwrap();
/// assert_eq!(extract_domain(&url).as_deref(), Some("docs.example.com"));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|host| host.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_lowercases_host() {
        let url = Url::parse("https://EXAMPLE.com/page").unwrap();
        assert_eq!(extract_domain(&url).as_deref(), Some("example.com"));
    }

    #[test]
    fn test_extract_domain_drops_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_domain(&url).as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_extract_domain_missing_host() {
        let url = Url::parse("mailto:user@example.com").unwrap();
        assert_eq!(extract_domain(&url), None);
    }
}
