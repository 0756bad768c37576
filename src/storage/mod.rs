//! Storage module for persisting crawl output
//!
//! This module handles everything written to disk after a crawl:
//! - Per-project directory layout under a configurable base directory
//! - One Markdown file per page, named from the sanitized page title
//! - A JSON manifest recording the whole run

mod file_store;

pub use file_store::FileStore;

use crate::crawler::CrawlResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Record of a completed crawl, serialized as `crawl.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlManifest {
    /// Storage namespace the crawl was saved under
    pub project: String,

    /// Canonical seed URL the crawl started from
    pub seed_url: String,

    /// When the manifest was assembled
    pub crawled_at: DateTime<Utc>,

    /// Number of results, failures included
    pub page_count: usize,

    /// Every per-page result of the run
    pub results: Vec<CrawlResult>,
}

impl CrawlManifest {
    /// Builds a manifest for `results`, stamped with the current time
    pub fn new(project: &str, seed_url: &str, results: Vec<CrawlResult>) -> Self {
        Self {
            project: project.to_string(),
            seed_url: seed_url.to_string(),
            crawled_at: Utc::now(),
            page_count: results.len(),
            results,
        }
    }
}
