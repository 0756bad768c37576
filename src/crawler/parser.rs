//! Page content extraction
//!
//! This module turns a fetched body into the pieces a crawl records:
//! - the page title (from the <title> tag)
//! - the visible text of the body, after noise elements are stripped
//! - the deduplicated list of same-domain links to follow
//!
//! The HTML5 parser is forgiving, so a body that is not markup still parses:
//! it becomes a document whose body text is the input, with no title and no
//! anchors. That shape is exactly what gets recorded for such pages.

use crate::markup;
use crate::url::{normalize_url, UrlFilter};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracted information from one fetched page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title, when the document has a non-empty <title>
    pub title: Option<String>,

    /// Visible text of the body after element stripping
    pub text: String,

    /// Canonical same-domain links, deduplicated in document order
    pub links: Vec<String>,
}

/// Extracts title, text, and links from fetched pages
///
/// One parser is built per crawl and shared by all fetch workers. It holds
/// the element-removal selectors and the link rules (fragment handling plus
/// the validity filter), so parsing itself needs only the body and the URL
/// of the page it came from.
#[derive(Debug, Clone)]
pub struct PageParser {
    remove_selectors: Vec<String>,
    ignore_fragments: bool,
    filter: UrlFilter,
}

impl PageParser {
    /// Creates a parser with the given removal selectors and link rules
    pub fn new(remove_selectors: Vec<String>, ignore_fragments: bool, filter: UrlFilter) -> Self {
        Self {
            remove_selectors,
            ignore_fragments,
            filter,
        }
    }

    /// Parses one fetched body
    ///
    /// Element removal happens first so that stripped elements contribute
    /// neither text nor links. Relative hrefs resolve against `page_url`,
    /// the URL the body was fetched from.
    pub fn parse(&self, body: &str, page_url: &Url) -> ParsedPage {
        let mut document = Html::parse_document(body);
        markup::strip_elements(&mut document, &self.remove_selectors);

        let title = markup::first_text(&document, "title");
        let text = markup::body_text(&document);
        let links = self.extract_links(&document, page_url);

        ParsedPage { title, text, links }
    }

    /// Collects the canonical form of every valid anchor target
    ///
    /// Order follows the document; the first occurrence of a canonical URL
    /// wins and later duplicates are dropped.
    fn extract_links(&self, document: &Html, page_url: &Url) -> Vec<String> {
        let anchor = match Selector::parse("a[href]") {
            Ok(selector) => selector,
            Err(_) => return Vec::new(),
        };

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&anchor) {
            let href = match element.value().attr("href") {
                Some(href) => href,
                None => continue,
            };

            let canonical = match normalize_url(href, page_url, self.ignore_fragments) {
                Some(canonical) => canonical,
                None => continue,
            };

            if !self.filter.is_valid(&canonical) {
                continue;
            }

            if seen.insert(canonical.clone()) {
                links.push(canonical);
            }
        }

        links
    }
}
