//! Sitescribe: a single-domain documentation crawler
//!
//! This crate implements a breadth-first crawler that maps one site, converts the
//! pages it collects to Markdown with YAML frontmatter, and writes them into a
//! per-project directory tree alongside a JSON manifest of the crawl.

pub mod config;
pub mod convert;
pub mod crawler;
pub mod markup;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Errors raised while constructing a crawler
///
/// Construction is the only fallible step. Once built, a crawl run reports
/// per-page problems through [`crawler::CrawlResult`] instead of failing.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid seed URL '{url}': {source}")]
    InvalidSeed {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Seed URL has no host: {0}")]
    MissingHost(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{load_config, load_config_with_hash, Config};
pub use convert::{ConvertOptions, MarkdownConverter};
pub use crawler::{CrawlResult, Crawler, CrawlerOptions, FetchError};
pub use storage::{CrawlManifest, FileStore, StorageError, StorageResult};
pub use url::{extract_domain, normalize_url, UrlFilter};
