//! Scheduler for managing the crawl frontier and request pacing
//!
//! This module handles:
//! - Handing out frontier URLs in breadth-first order
//! - Pausing for the fixed delay after each fetch attempt completes
//! - Owning the crawl state so every mutation goes through one place

use crate::state::CrawlState;
use std::time::{Duration, Instant};
use url::Url;

/// Scheduler owns the crawl state and paces fetch attempts
///
/// The delay runs from the end of one attempt to the start of the next,
/// whatever the outcome; the first attempt is never delayed.
#[derive(Debug)]
pub struct Scheduler {
    /// Visited / frontier / discovered sets
    state: CrawlState,

    /// Minimum time between two fetch attempts
    delay: Duration,

    /// When the last attempt finished
    last_completed: Option<Instant>,
}

impl Scheduler {
    /// Creates a scheduler whose frontier holds only the base URL
    pub fn new(base_url: Url, delay: Duration) -> Self {
        Self::from_state(CrawlState::new(base_url), delay)
    }

    /// Creates a scheduler over an existing state
    pub fn from_state(state: CrawlState, delay: Duration) -> Self {
        Self {
            state,
            delay,
            last_completed: None,
        }
    }

    /// Gets the next URL to fetch
    ///
    /// Pops the frontier head (skipping visited URLs) and waits until the
    /// delay since the previous attempt finished has elapsed. The caller
    /// reports the end of the attempt with [`Scheduler::record_completion`].
    ///
    /// # Returns
    ///
    /// * `Some(Url)` - A URL that may be fetched now
    /// * `None` - The frontier is exhausted
    pub async fn next_url(&mut self) -> Option<Url> {
        let url = self.state.next_pending()?;

        if let Some(wait) = self.time_until_next_request(Instant::now()) {
            tracing::trace!("Waiting {:?} before fetching {}", wait, url);
            tokio::time::sleep(wait).await;
        }

        Some(url)
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.delay {
            None
        } else {
            Some(self.delay - elapsed)
        }
    }

    /// Records that a fetch attempt (including its retries) finished
    pub fn record_completion(&mut self, now: Instant) {
        self.last_completed = Some(now);
    }

    /// Adds a URL to the tail of the frontier
    ///
    /// Returns false when the URL is already visited or pending.
    pub fn add_to_frontier(&mut self, url: Url) -> bool {
        self.state.enqueue(url)
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.state.frontier_len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.state.is_exhausted()
    }

    /// The configured delay between attempts
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CrawlState {
        &mut self.state
    }

    /// Consumes the scheduler, returning the crawl state
    pub fn into_state(self) -> CrawlState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(path: &str) -> Url {
        Url::parse(&format!("https://example.com{}", path)).unwrap()
    }

    #[test]
    fn test_new_scheduler() {
        let scheduler = Scheduler::new(url("/"), Duration::from_millis(500));
        assert_eq!(scheduler.frontier_size(), 1);
        assert!(!scheduler.is_empty());
        assert_eq!(scheduler.delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_add_to_frontier() {
        let mut scheduler = Scheduler::new(url("/"), Duration::ZERO);
        assert!(scheduler.add_to_frontier(url("/page")));
        assert!(!scheduler.add_to_frontier(url("/page")));
        assert_eq!(scheduler.frontier_size(), 2);
    }

    #[tokio::test]
    async fn test_next_url_from_frontier() {
        let mut scheduler = Scheduler::new(url("/"), Duration::ZERO);
        scheduler.add_to_frontier(url("/a"));

        assert_eq!(scheduler.next_url().await, Some(url("/")));
        assert_eq!(scheduler.next_url().await, Some(url("/a")));
        assert_eq!(scheduler.next_url().await, None);
        assert!(scheduler.is_empty());
    }

    #[tokio::test]
    async fn test_next_url_empty_frontier() {
        let mut scheduler = Scheduler::from_state(CrawlState::default(), Duration::ZERO);
        assert!(scheduler.next_url().await.is_none());
    }

    #[test]
    fn test_first_request_not_delayed() {
        let scheduler = Scheduler::new(url("/"), Duration::from_secs(5));
        assert!(scheduler.time_until_next_request(Instant::now()).is_none());
    }

    #[test]
    fn test_time_until_next_request() {
        let mut scheduler = Scheduler::new(url("/"), Duration::from_millis(1000));
        let start = Instant::now();
        scheduler.record_completion(start);

        let wait = scheduler
            .time_until_next_request(start + Duration::from_millis(300))
            .unwrap();
        assert_eq!(wait, Duration::from_millis(700));

        assert!(scheduler
            .time_until_next_request(start + Duration::from_millis(1000))
            .is_none());
    }

    #[tokio::test]
    async fn test_delay_between_attempts() {
        let delay = Duration::from_millis(50);
        let mut scheduler = Scheduler::new(url("/"), delay);
        scheduler.add_to_frontier(url("/a"));

        scheduler.next_url().await.unwrap();
        let done = Instant::now();
        scheduler.record_completion(done);
        scheduler.next_url().await.unwrap();
        assert!(done.elapsed() >= delay);
    }

    #[tokio::test]
    async fn test_slow_fetch_still_followed_by_full_delay() {
        let delay = Duration::from_millis(30);
        let mut scheduler = Scheduler::new(url("/"), delay);
        scheduler.add_to_frontier(url("/a"));

        scheduler.next_url().await.unwrap();
        // Fetch takes longer than the delay
        tokio::time::sleep(Duration::from_millis(60)).await;
        let done = Instant::now();
        scheduler.record_completion(done);

        assert_eq!(scheduler.time_until_next_request(done), Some(delay));
        scheduler.next_url().await.unwrap();
        assert!(done.elapsed() >= delay);
    }

    #[tokio::test]
    async fn test_state_mutations_visible() {
        let mut scheduler = Scheduler::new(url("/"), Duration::ZERO);
        let head = scheduler.next_url().await.unwrap();
        scheduler.state_mut().mark_visited(head.clone());

        assert!(!scheduler.add_to_frontier(head));
        assert_eq!(scheduler.into_state().visited_count(), 1);
    }
}
