use crate::convert::ConvertOptions;
use crate::crawler::CrawlerOptions;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure for sitescribe
///
/// Only the `[crawl]` table is required; `[convert]` and `[storage]`
/// fall back to their defaults when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub convert: ConvertConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from; its host becomes the crawl domain
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum link distance from the seed
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Page budget for the whole run
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Number of pages fetched together
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Per-request deadline in milliseconds
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Whether `#fragment` suffixes are dropped from URLs
    #[serde(rename = "ignore-fragments", default = "default_true")]
    pub ignore_fragments: bool,

    /// Extra path patterns to exclude, unioned with the built-in defaults
    #[serde(rename = "exclude-patterns", default)]
    pub exclude_patterns: Vec<String>,

    /// Path patterns the crawl is restricted to (empty = no restriction)
    #[serde(rename = "include-patterns", default)]
    pub include_patterns: Vec<String>,

    /// Extra file extensions to skip, unioned with the built-in defaults
    #[serde(rename = "ignore-extensions", default)]
    pub ignore_extensions: Vec<String>,

    /// Extra CSS selectors stripped from fetched pages
    #[serde(rename = "remove-elements", default)]
    pub remove_elements: Vec<String>,
}

impl CrawlConfig {
    /// Crawler options implied by this section
    pub fn crawler_options(&self) -> CrawlerOptions {
        CrawlerOptions {
            max_depth: self.max_depth,
            max_pages: self.max_pages,
            concurrency: self.concurrency,
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            ignore_fragments: self.ignore_fragments,
            exclude_patterns: self.exclude_patterns.clone(),
            include_patterns: self.include_patterns.clone(),
            ignore_extensions: self.ignore_extensions.clone(),
            remove_elements: self.remove_elements.clone(),
        }
    }
}

/// Document conversion configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertConfig {
    /// Keep `img` elements in converted documents
    #[serde(rename = "keep-images", default)]
    pub keep_images: bool,

    /// Keep `table` elements in converted documents
    #[serde(rename = "keep-tables", default)]
    pub keep_tables: bool,

    /// Keep `pre` and `code` elements in converted documents
    #[serde(rename = "keep-code-blocks", default)]
    pub keep_code_blocks: bool,

    /// Extra CSS selectors stripped before conversion
    #[serde(rename = "remove-elements", default)]
    pub remove_elements: Vec<String>,
}

impl ConvertConfig {
    /// Conversion options implied by this section
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            keep_images: self.keep_images,
            keep_tables: self.keep_tables,
            keep_code_blocks: self.keep_code_blocks,
            remove_elements: self.remove_elements.clone(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory crawl output is rooted under
    #[serde(rename = "base-dir", default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Storage namespace; defaults to the crawl domain when omitted
    #[serde(default)]
    pub project: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            project: None,
        }
    }
}

fn default_max_depth() -> u32 {
    3
}

fn default_max_pages() -> usize {
    100
}

fn default_concurrency() -> usize {
    5
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

fn default_true() -> bool {
    true
}

fn default_base_dir() -> PathBuf {
    PathBuf::from("data")
}
