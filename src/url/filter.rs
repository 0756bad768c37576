use url::Url;

/// Decides which canonical URLs belong to a crawl
///
/// A filter is built once per crawl from the seed's host and the merged
/// pattern lists, then applied to every discovered link. Checks run in a
/// fixed order and all of them operate on the lower-cased URL path (the
/// host check uses the host itself):
///
/// 1. The URL must parse and its host must equal the crawl domain exactly;
///    subdomains are different hosts and are rejected
/// 2. The path must not end with an ignored extension
/// 3. The path must not contain an excluded pattern
/// 4. When include patterns are present, the path must contain at least
///    one of them; an empty include list admits everything
#[derive(Debug, Clone)]
pub struct UrlFilter {
    domain: String,
    ignore_extensions: Vec<String>,
    exclude_patterns: Vec<String>,
    include_patterns: Vec<String>,
}

impl UrlFilter {
    /// Creates a filter for `domain` with the given merged pattern lists
    ///
    /// Patterns and extensions are lower-cased here so that `is_valid` can
    /// compare them against the lower-cased path directly.
    pub fn new(
        domain: &str,
        ignore_extensions: &[String],
        exclude_patterns: &[String],
        include_patterns: &[String],
    ) -> Self {
        Self {
            domain: domain.to_lowercase(),
            ignore_extensions: lowercase_all(ignore_extensions),
            exclude_patterns: lowercase_all(exclude_patterns),
            include_patterns: lowercase_all(include_patterns),
        }
    }

    /// Returns true if `url` should be enqueued for fetching
    ///
    /// Expects a canonical URL as produced by
    /// [`normalize_url`](crate::url::normalize_url); anything that fails to
    /// parse is rejected.
    pub fn is_valid(&self, url: &str) -> bool {
        if url.is_empty() {
            return false;
        }

        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        // Same-host check; schemes without a host (mailto:, data:) fail here
        if parsed.host_str() != Some(self.domain.as_str()) {
            return false;
        }

        let path = parsed.path().to_lowercase();

        if self
            .ignore_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            return false;
        }

        if self
            .exclude_patterns
            .iter()
            .any(|pattern| path.contains(pattern.as_str()))
        {
            return false;
        }

        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|pattern| path.contains(pattern.as_str()))
        {
            return false;
        }

        true
    }
}

fn lowercase_all(items: &[String]) -> Vec<String> {
    items.iter().map(|item| item.to_lowercase()).collect()
}
