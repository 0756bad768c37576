use url::Url;

/// Normalizes a raw href into the canonical form used for frontier and
/// visited-set bookkeeping
///
/// # Normalization Steps
///
/// 1. When `ignore_fragments` is set, drop the fragment: keep everything
///    before the first `#`
/// 2. Reject the href if it is empty after fragment handling
/// 3. Parse as an absolute URL; if that fails, resolve it relative to `base`
/// 4. Strip exactly one trailing `/` from the resolved href
///
/// Two hrefs that differ only by fragment or trailing slash therefore map to
/// the same canonical string, and canonical strings are a fixed point of the
/// function.
///
/// # Arguments
///
/// * `raw` - The href as it appeared in the document (absolute or relative)
/// * `base` - The URL of the page the href was found on
/// * `ignore_fragments` - Whether fragments are dropped before resolution
///
/// # Returns
///
/// * `Some(String)` - The canonical absolute URL
/// * `None` - The href was empty or could not be resolved
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sitescribe::url::normalize_url;
///
/// let base = Url::parse("https://example.com/docs/").unwrap();
/// assert_eq!(
///     normalize_url("guide#intro", &base, true).as_deref(),
///     Some("https://example.com/docs/guide")
/// );
/// ```
pub fn normalize_url(raw: &str, base: &Url, ignore_fragments: bool) -> Option<String> {
    // Step 1: Drop the fragment before any parsing
    let raw = if ignore_fragments {
        raw.split('#').next().unwrap_or("")
    } else {
        raw
    };

    // Step 2: A bare fragment or empty href resolves to nothing
    if raw.is_empty() {
        return None;
    }

    // Step 3: Absolute hrefs stand alone, everything else resolves
    // against the page it was found on
    let resolved = match Url::parse(raw) {
        Ok(url) => url,
        Err(_) => base.join(raw).ok()?,
    };

    // Step 4: Strip one trailing slash so `/page/` and `/page` collapse
    let href = resolved.as_str();
    let canonical = href.strip_suffix('/').unwrap_or(href);

    Some(canonical.to_string())
}
