//! Crawl orchestration
//!
//! This module contains the crawler itself: option handling, the batch loop
//! that drives fetching, and the per-page workers. A crawl proceeds in
//! rounds: up to `concurrency` queued URLs are dispatched together, every
//! worker claims its URL before fetching, and the frontier is extended only
//! after the whole batch has joined. Page failures are recorded on the
//! page's result and never abort the run.

use crate::crawler::fetcher::{self, FetchError};
use crate::crawler::frontier::{Frontier, FrontierEntry};
use crate::crawler::parser::PageParser;
use crate::url::{extract_domain, normalize_url, UrlFilter};
use crate::CrawlError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use url::Url;

/// File extensions never fetched, regardless of configuration
pub const DEFAULT_IGNORE_EXTENSIONS: &[&str] = &[
    ".css", ".js", ".txt", ".ttf", ".woff", ".png", ".jpg", ".jpeg", ".svg", ".pdf", ".zip",
    ".mp3", ".mp4", ".webm", ".xml", ".json", ".docx", ".xlsx", ".pptx", ".doc", ".xls", ".ppt",
    ".html",
];

/// Path patterns excluded from every crawl
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "/wp-content/",
    "/wp-includes/",
    "/wp-admin/",
    "/wp-json",
    "mailto:",
    "tel:",
    "javascript:",
    "#",
    "/feed",
    ".php",
    "/page",
];

/// Elements stripped from every page before text extraction
pub const DEFAULT_REMOVE_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "iframe", "img", "svg", "video", "audio", "form",
];

/// Options controlling a crawl
///
/// The pattern and selector lists are additions: they are merged with the
/// built-in defaults rather than replacing them. Include patterns have no
/// defaults; an empty list admits every in-domain URL.
#[derive(Debug, Clone)]
pub struct CrawlerOptions {
    /// Maximum link distance from the seed; pages at this depth are
    /// fetched but their links are not followed
    pub max_depth: u32,

    /// Page budget; a final batch may finish up to `concurrency - 1`
    /// pages past it
    pub max_pages: usize,

    /// Number of pages fetched together per batch
    pub concurrency: usize,

    /// Per-request deadline, covering connection and body download
    pub request_timeout: Duration,

    /// Whether `#fragment` suffixes are dropped during normalization
    pub ignore_fragments: bool,

    /// Extra path patterns to exclude
    pub exclude_patterns: Vec<String>,

    /// Path patterns to restrict the crawl to
    pub include_patterns: Vec<String>,

    /// Extra file extensions to skip
    pub ignore_extensions: Vec<String>,

    /// Extra CSS selectors to strip before text extraction
    pub remove_elements: Vec<String>,
}

impl Default for CrawlerOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_pages: 100,
            concurrency: 5,
            request_timeout: Duration::from_millis(30_000),
            ignore_fragments: true,
            exclude_patterns: Vec::new(),
            include_patterns: Vec::new(),
            ignore_extensions: Vec::new(),
            remove_elements: Vec::new(),
        }
    }
}

/// Record of one fetched (or failed) page
///
/// A crawl produces exactly one result per distinct URL it claimed. Failed
/// pages carry the failure text in `error`, an empty `content`, no links,
/// and the URL standing in for the title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    /// Canonical URL of the page
    pub url: String,

    /// Page title, or the URL when the document has none
    pub title: String,

    /// Visible text of the body after element stripping
    pub content: String,

    /// Canonical same-domain links found on the page
    pub links: Vec<String>,

    /// Link distance from the seed
    pub depth: u32,

    /// Failure text when the fetch did not produce a page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Breadth-first single-domain crawler
///
/// Construction validates the seed and builds the shared HTTP client; it is
/// the only fallible step. Each call to [`crawl`](Crawler::crawl) runs an
/// independent traversal with its own frontier and visited set.
///
/// # Example
///
/// ```no_run
/// use sitescribe::crawler::{Crawler, CrawlerOptions};
///
/// # async fn example() -> Result<(), sitescribe::CrawlError> {
/// let crawler = Crawler::new("https://example.com/docs", CrawlerOptions::default())?;
/// let results = crawler.crawl().await;
/// println!("crawled {} pages", results.len());
/// # Ok(())
/// # }
/// ```
pub struct Crawler {
    seed: String,
    domain: String,
    options: CrawlerOptions,
    client: Client,
    parser: Arc<PageParser>,
}

impl Crawler {
    /// Creates a crawler for the domain of `seed_url`
    ///
    /// The seed must parse as an absolute URL with a host; its host becomes
    /// the crawl domain. The seed itself is exempt from the validity filter,
    /// so a crawl can start from a URL the pattern lists would exclude.
    ///
    /// # Errors
    ///
    /// * [`CrawlError::InvalidSeed`] - the seed is not an absolute URL
    /// * [`CrawlError::MissingHost`] - the seed has no host to crawl
    /// * [`CrawlError::Client`] - the HTTP client could not be built
    pub fn new(seed_url: &str, options: CrawlerOptions) -> Result<Self, CrawlError> {
        let parsed = Url::parse(seed_url).map_err(|source| CrawlError::InvalidSeed {
            url: seed_url.to_string(),
            source,
        })?;

        let domain = match extract_domain(&parsed) {
            Some(domain) => domain,
            None => return Err(CrawlError::MissingHost(seed_url.to_string())),
        };

        // The seed is keyed in the visited set like any discovered link,
        // so it goes through the same canonicalization
        let seed = normalize_url(seed_url, &parsed, options.ignore_fragments)
            .unwrap_or_else(|| parsed.to_string());

        let ignore_extensions =
            merge_with_defaults(&options.ignore_extensions, DEFAULT_IGNORE_EXTENSIONS);
        let exclude_patterns =
            merge_with_defaults(&options.exclude_patterns, DEFAULT_EXCLUDE_PATTERNS);
        let remove_elements =
            merge_with_defaults(&options.remove_elements, DEFAULT_REMOVE_ELEMENTS);

        let filter = UrlFilter::new(
            &domain,
            &ignore_extensions,
            &exclude_patterns,
            &options.include_patterns,
        );
        let parser = PageParser::new(remove_elements, options.ignore_fragments, filter);
        let client = fetcher::build_http_client(options.request_timeout)?;

        Ok(Self {
            seed,
            domain,
            options,
            client,
            parser: Arc::new(parser),
        })
    }

    /// The crawl domain, the lower-cased host of the seed
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The canonical seed URL the crawl starts from
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Runs a breadth-first crawl and returns one result per visited page
    ///
    /// The loop dispatches batches until the frontier drains or the page
    /// budget is met. Because a dispatched batch always runs to completion,
    /// the run can finish with up to `concurrency - 1` results beyond
    /// `max_pages`. Within a batch, results are appended in the order
    /// fetches complete; discovered links are enqueued in the order their
    /// pages were dequeued.
    pub async fn crawl(&self) -> Vec<CrawlResult> {
        let mut frontier = Frontier::new(self.seed.clone());
        let visited = frontier.visited();
        let mut results: Vec<CrawlResult> = Vec::new();

        tracing::info!(
            "Starting crawl of {} (max_depth={}, max_pages={}, concurrency={})",
            self.seed,
            self.options.max_depth,
            self.options.max_pages,
            self.options.concurrency
        );

        while !frontier.is_empty() && results.len() < self.options.max_pages {
            let batch = frontier.next_batch(self.options.concurrency);
            let batch_len = batch.len();
            tracing::debug!(
                "Dispatching batch of {} ({} crawled, {} queued)",
                batch_len,
                results.len(),
                frontier.len()
            );

            let mut tasks = JoinSet::new();
            for (slot, entry) in batch.into_iter().enumerate() {
                let client = self.client.clone();
                let parser = Arc::clone(&self.parser);
                let visited = visited.clone();
                let timeout = self.options.request_timeout;

                tasks.spawn(async move {
                    // Claim before fetching; losing the claim means another
                    // worker or an earlier batch already owns this URL
                    if !visited.claim(&entry.url) {
                        return None;
                    }
                    Some((slot, process_page(&client, &parser, entry, timeout).await))
                });
            }

            let mut discovered: Vec<Option<(u32, Vec<String>)>> = vec![None; batch_len];
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(Some((slot, page))) => {
                        if page.error.is_none() && page.depth < self.options.max_depth {
                            discovered[slot] = Some((page.depth + 1, page.links.clone()));
                        }
                        results.push(page);
                    }
                    Ok(None) => {}
                    Err(e) => tracing::error!("Fetch task failed to join: {}", e),
                }
            }

            // Extend the frontier in dequeue order, not completion order
            for (depth, links) in discovered.into_iter().flatten() {
                frontier.extend(&links, depth);
            }
        }

        let failed = results.iter().filter(|r| r.error.is_some()).count();
        tracing::info!(
            "Crawl finished: {} pages ({} failed)",
            results.len(),
            failed
        );

        results
    }
}

/// Fetches and parses one claimed frontier entry
async fn process_page(
    client: &Client,
    parser: &PageParser,
    entry: FrontierEntry,
    timeout: Duration,
) -> CrawlResult {
    let page_url = match Url::parse(&entry.url) {
        Ok(url) => url,
        Err(e) => return failed_result(entry, FetchError::Network(e.to_string()).to_string()),
    };

    match fetcher::fetch(client, &entry.url, timeout).await {
        Ok(body) => {
            let parsed = parser.parse(&body, &page_url);
            tracing::debug!(
                "Fetched {} at depth {} ({} links)",
                entry.url,
                entry.depth,
                parsed.links.len()
            );
            CrawlResult {
                title: parsed.title.unwrap_or_else(|| entry.url.clone()),
                url: entry.url,
                content: parsed.text,
                links: parsed.links,
                depth: entry.depth,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch {}: {}", entry.url, e);
            failed_result(entry, e.to_string())
        }
    }
}

/// Error-shaped result: URL as title, empty content, no links
fn failed_result(entry: FrontierEntry, error: String) -> CrawlResult {
    CrawlResult {
        title: entry.url.clone(),
        url: entry.url,
        content: String::new(),
        links: Vec::new(),
        depth: entry.depth,
        error: Some(error),
    }
}

/// User-supplied entries first, built-in defaults after
fn merge_with_defaults(user: &[String], defaults: &[&str]) -> Vec<String> {
    user.iter()
        .cloned()
        .chain(defaults.iter().map(|s| s.to_string()))
        .collect()
}
