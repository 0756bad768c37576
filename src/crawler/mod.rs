//! Breadth-first page crawling
//!
//! This module provides:
//! - The crawler and its options ([`Crawler`], [`CrawlerOptions`])
//! - Per-page results ([`CrawlResult`])
//! - HTTP fetching with error classification ([`fetch`], [`FetchError`])
//! - HTML parsing into title, text, and links ([`PageParser`])
//! - The FIFO frontier and shared visited set ([`Frontier`], [`VisitedSet`])

mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{
    CrawlResult, Crawler, CrawlerOptions, DEFAULT_EXCLUDE_PATTERNS, DEFAULT_IGNORE_EXTENSIONS,
    DEFAULT_REMOVE_ELEMENTS,
};
pub use fetcher::{build_http_client, fetch, FetchError};
pub use frontier::{Frontier, FrontierEntry, VisitedSet};
pub use parser::{PageParser, ParsedPage};
