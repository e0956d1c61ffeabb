use std::collections::{HashSet, VecDeque};
use url::Url;

/// Visited set, FIFO frontier and discovered links of a single crawl
///
/// Invariants:
/// - a URL is queued at most once while pending
/// - `visited` and the frontier never share a URL
#[derive(Debug, Clone, Default)]
pub struct CrawlState {
    /// Pages fetched successfully
    visited: HashSet<Url>,

    /// Pending URLs in breadth-first order
    frontier: VecDeque<Url>,

    /// Mirror of `frontier` for constant-time membership checks
    queued: HashSet<Url>,

    /// Every same-domain link extracted so far
    discovered: HashSet<Url>,
}

impl CrawlState {
    /// Creates the initial state: the base URL alone in the frontier
    pub fn new(base_url: Url) -> Self {
        let mut state = Self::default();
        state.enqueue(base_url);
        state
    }

    /// Pops the head of the frontier, skipping URLs already visited
    pub fn next_pending(&mut self) -> Option<Url> {
        while let Some(url) = self.frontier.pop_front() {
            self.queued.remove(&url);
            if self.visited.contains(&url) {
                tracing::trace!("Skipping already visited {}", url);
                continue;
            }
            return Some(url);
        }
        None
    }

    /// Appends a URL to the tail of the frontier
    ///
    /// Returns false (and does nothing) when the URL is already visited or
    /// already pending.
    pub fn enqueue(&mut self, url: Url) -> bool {
        if self.visited.contains(&url) || self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.frontier.push_back(url);
        true
    }

    /// Records a successful fetch
    ///
    /// Returns false if the URL was already visited.
    pub fn mark_visited(&mut self, url: Url) -> bool {
        if self.queued.remove(&url) {
            self.frontier.retain(|pending| pending != &url);
        }
        self.visited.insert(url)
    }

    /// Merges extracted links into the discovered set
    ///
    /// Returns how many of them were new.
    pub fn record_discovered<'a, I>(&mut self, links: I) -> usize
    where
        I: IntoIterator<Item = &'a Url>,
    {
        links
            .into_iter()
            .filter(|link| self.discovered.insert((*link).clone()))
            .count()
    }

    /// Returns true if the URL has been fetched successfully
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Returns true if the URL is waiting in the frontier
    pub fn is_queued(&self, url: &Url) -> bool {
        self.queued.contains(url)
    }

    /// Number of pages fetched successfully
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of pending URLs
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is exhausted
    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Number of distinct links discovered so far
    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    /// The visited set
    pub fn visited(&self) -> &HashSet<Url> {
        &self.visited
    }

    /// The discovered set
    pub fn discovered(&self) -> &HashSet<Url> {
        &self.discovered
    }

    /// Consumes the state, keeping only the discovered links
    pub fn into_discovered(self) -> HashSet<Url> {
        self.discovered
    }
}
