//! Crawl frontier bookkeeping
//!
//! The frontier is the run-local state of one crawl:
//! - a FIFO queue of URLs waiting to be fetched, each with its depth
//! - the set of URLs already claimed for fetching
//!
//! The queue is touched only between batches, by the crawl loop. The visited
//! set is shared with the fetch workers of a batch, which claim their URL
//! before fetching; claiming is a single check-and-set, so two workers
//! handed the same URL cannot both fetch it.

use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};

/// One queued URL and the depth it was discovered at
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    /// Canonical URL to fetch
    pub url: String,

    /// Link distance from the seed; the seed itself is depth 0
    pub depth: u32,
}

/// Shared set of canonical URLs already claimed for fetching
///
/// Cloning is cheap and shares the underlying set, so every worker in a
/// batch sees the claims of its peers.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    inner: Arc<Mutex<HashSet<String>>>,
}

impl VisitedSet {
    /// Claims `url` for fetching
    ///
    /// Returns true if the claim succeeded. Exactly one caller wins for any
    /// given URL; everyone else gets false and must skip the fetch.
    pub fn claim(&self, url: &str) -> bool {
        self.inner.lock().unwrap().insert(url.to_string())
    }

    /// Returns true if `url` has already been claimed
    pub fn contains(&self, url: &str) -> bool {
        self.inner.lock().unwrap().contains(url)
    }

    /// Number of claimed URLs
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    /// Returns true if nothing has been claimed yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// FIFO frontier of one crawl run
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    visited: VisitedSet,
}

impl Frontier {
    /// Creates a frontier holding only the seed at depth 0
    pub fn new(seed: String) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(FrontierEntry {
            url: seed,
            depth: 0,
        });
        Self {
            queue,
            visited: VisitedSet::default(),
        }
    }

    /// Removes and returns up to `max` entries from the front of the queue
    pub fn next_batch(&mut self, max: usize) -> Vec<FrontierEntry> {
        let take = max.min(self.queue.len());
        self.queue.drain(..take).collect()
    }

    /// Appends the given links at `depth`, skipping already-claimed URLs
    ///
    /// The queue itself is not deduplicated: a URL two pages both link to
    /// can sit in the queue twice. The claim at fetch time collapses such
    /// duplicates to a single fetch.
    pub fn extend(&mut self, links: &[String], depth: u32) {
        for link in links {
            if !self.visited.contains(link) {
                self.queue.push_back(FrontierEntry {
                    url: link.clone(),
                    depth,
                });
            }
        }
    }

    /// Handle to the visited set, for sharing with fetch workers
    pub fn visited(&self) -> VisitedSet {
        self.visited.clone()
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if no entries are queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
