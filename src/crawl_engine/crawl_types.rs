//! Frontier and visited-set state for one crawl invocation.

use std::collections::{HashSet, VecDeque};

use crate::utils::CaptureUrl;

/// Represents an item in the crawl queue with URL and depth tracking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlQueue {
    pub url: CaptureUrl,
    pub depth: u32,
}

/// FIFO frontier paired with the visited set
///
/// A URL is marked visited at most once, and the discovered list never grows
/// past `max_pages`. Seeds are always kept, even when they alone exceed the cap.
#[derive(Debug)]
pub struct CrawlFrontier {
    queue: VecDeque<CrawlQueue>,
    visited: HashSet<CaptureUrl>,
    discovered: Vec<CaptureUrl>,
    max_pages: usize,
}

impl CrawlFrontier {
    /// Start a frontier with every seed at depth 0
    #[must_use]
    pub fn from_seeds(seeds: &[CaptureUrl], max_pages: usize) -> Self {
        let mut frontier = Self {
            queue: VecDeque::with_capacity(seeds.len()),
            visited: HashSet::with_capacity(seeds.len()),
            discovered: Vec::with_capacity(seeds.len()),
            max_pages,
        };
        for seed in seeds {
            if frontier.visited.insert(seed.clone()) {
                frontier.discovered.push(seed.clone());
                frontier.queue.push_back(CrawlQueue {
                    url: seed.clone(),
                    depth: 0,
                });
            }
        }
        frontier
    }

    pub fn pop(&mut self) -> Option<CrawlQueue> {
        self.queue.pop_front()
    }

    /// Record a newly found link; returns `false` when it was already
    /// visited or the cap has been reached
    pub fn discover(&mut self, url: CaptureUrl, depth: u32) -> bool {
        if self.is_full() || self.visited.contains(&url) {
            return false;
        }
        self.visited.insert(url.clone());
        self.discovered.push(url.clone());
        self.queue.push_back(CrawlQueue { url, depth });
        true
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.discovered.len() >= self.max_pages
    }

    #[must_use]
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// Discovered URLs in discovery order, seeds first
    #[must_use]
    pub fn into_discovered(self) -> Vec<CaptureUrl> {
        self.discovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::normalize_capture_url;

    fn url(raw: &str) -> CaptureUrl {
        normalize_capture_url(raw).expect("test URL is valid")
    }

    #[test]
    fn seeds_are_deduplicated_and_queued_at_depth_zero() {
        let seeds = [url("a.com/x"), url("a.com/x"), url("a.com/y")];
        let mut frontier = CrawlFrontier::from_seeds(&seeds, 10);

        assert_eq!(frontier.discovered_count(), 2);
        assert_eq!(frontier.pop().map(|q| q.depth), Some(0));
        assert_eq!(frontier.pop().map(|q| q.url), Some(url("a.com/y")));
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn discover_rejects_visited_and_respects_cap() {
        let mut frontier = CrawlFrontier::from_seeds(&[url("a.com")], 2);

        assert!(!frontier.discover(url("a.com"), 1));
        assert!(frontier.discover(url("a.com/b"), 1));
        assert!(frontier.is_full());
        assert!(!frontier.discover(url("a.com/c"), 1));
        assert_eq!(
            frontier.into_discovered(),
            vec![url("a.com"), url("a.com/b")]
        );
    }

    #[test]
    fn oversized_seed_list_is_kept_whole() {
        let seeds = [url("a.com/1"), url("a.com/2"), url("a.com/3")];
        let frontier = CrawlFrontier::from_seeds(&seeds, 1);
        assert!(frontier.is_full());
        assert_eq!(frontier.into_discovered().len(), 3);
    }
}
