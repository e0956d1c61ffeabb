//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates:
//! - Pulling URLs from the frontier in breadth-first order
//! - Fetching pages (with the optional retry policy)
//! - Extracting links and admitting them to the frontier
//! - Stopping cleanly on operator interrupt

use crate::config::{parse_base_url, Config};
use crate::crawler::fetcher::{fetch_with_retry, FetchResult, HttpFetcher, PageFetcher, RetryPolicy};
use crate::crawler::parser::extract_links_from_html;
use crate::crawler::scheduler::Scheduler;
use crate::state::CrawlState;
use crate::url::{classify_link, extract_domain, ExcludedExtensions, LinkClassification};
use crate::{UrlError, UrlResult};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::future::Future;
use std::time::{Duration, Instant};
use url::Url;

/// Knobs of the traversal engine that are not part of the crawl state
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Pause between successive fetch attempts
    pub delay: Duration,

    /// Extensions that never enter the frontier
    pub excluded: ExcludedExtensions,

    /// Retry policy for transient failures
    pub retry: RetryPolicy,
}

impl CrawlOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            delay: Duration::from_millis(config.crawler.delay_ms),
            excluded: ExcludedExtensions::new(&config.filter.excluded_extensions),
            retry: RetryPolicy::from_config(&config.crawler),
        }
    }
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            excluded: ExcludedExtensions::default(),
            retry: RetryPolicy::none(),
        }
    }
}

/// Outcome of a crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Where the crawl started
    pub base_url: Url,

    /// Every same-domain link extracted from fetched pages (unordered)
    pub discovered: HashSet<Url>,

    /// Pages fetched successfully
    pub pages_visited: usize,

    /// Fetch attempts that failed
    pub pages_failed: usize,

    /// Total fetch attempts
    pub attempts: usize,

    /// True if the operator stopped the crawl before the frontier emptied
    pub interrupted: bool,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Discovered links as strings, sorted lexicographically
    pub fn discovered_sorted(&self) -> Vec<String> {
        let mut links: Vec<String> = self.discovered.iter().map(|u| u.to_string()).collect();
        links.sort();
        links
    }

    /// Wall-clock duration of the crawl in seconds
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

/// Main crawler coordinator structure
///
/// Single-threaded: one fetch at a time, each followed by link extraction and
/// frontier admission before the next URL is pulled.
pub struct Coordinator<F: PageFetcher> {
    fetcher: F,
    scheduler: Scheduler,
    base_url: Url,
    domain_host: String,
    excluded: ExcludedExtensions,
    retry: RetryPolicy,
    pages_visited: usize,
    pages_failed: usize,
    attempts: usize,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// Fails before any network activity if the base URL is unusable or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let base_url = parse_base_url(&config.crawler.base_url)?;
        let fetcher = HttpFetcher::from_config(&config.crawler)?;
        Ok(Self::new(base_url, fetcher, CrawlOptions::from_config(config))?)
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// The crawl is bounded to the base URL's host.
    pub fn new(base_url: Url, fetcher: F, options: CrawlOptions) -> UrlResult<Self> {
        let domain_host = extract_domain(&base_url).ok_or(UrlError::MissingDomain)?;
        let scheduler = Scheduler::from_state(CrawlState::new(base_url.clone()), options.delay);

        Ok(Self {
            fetcher,
            scheduler,
            base_url,
            domain_host,
            excluded: options.excluded,
            retry: options.retry,
            pages_visited: 0,
            pages_failed: 0,
            attempts: 0,
        })
    }

    /// The host every crawled URL must share
    pub fn domain_host(&self) -> &str {
        &self.domain_host
    }

    /// Read access to the crawl state
    pub fn state(&self) -> &CrawlState {
        self.scheduler.state()
    }

    /// Runs the crawl until the frontier is exhausted
    pub async fn run(self) -> CrawlReport {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Runs the crawl until the frontier is exhausted or `shutdown` resolves
    ///
    /// On shutdown the page in flight is abandoned and the report is flagged
    /// `interrupted`; links discovered so far are kept.
    pub async fn run_until<S>(mut self, shutdown: S) -> CrawlReport
    where
        S: Future<Output = ()>,
    {
        tracing::info!("Starting extraction for domain: {}", self.domain_host);

        let started_at = Utc::now();
        let mut interrupted = false;
        tokio::pin!(shutdown);

        loop {
            let next = tokio::select! {
                biased;
                _ = &mut shutdown => {
                    interrupted = true;
                    break;
                }
                next = self.scheduler.next_url() => next,
            };

            let Some(url) = next else {
                tracing::debug!("Frontier is empty, crawl complete");
                break;
            };

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    interrupted = true;
                    break;
                }
                _ = self.process_url(url) => {}
            }
        }

        let finished_at = Utc::now();
        let state = self.scheduler.into_state();

        if interrupted {
            tracing::info!(
                "Crawl interrupted: {} pages visited, {} links found so far",
                self.pages_visited,
                state.discovered_count()
            );
        } else {
            tracing::info!(
                "Extraction complete. {} pages visited, {} links found in {}s",
                self.pages_visited,
                state.discovered_count(),
                (finished_at - started_at).num_seconds()
            );
        }

        CrawlReport {
            base_url: self.base_url,
            discovered: state.into_discovered(),
            pages_visited: self.pages_visited,
            pages_failed: self.pages_failed,
            attempts: self.attempts,
            interrupted,
            started_at,
            finished_at,
        }
    }

    /// Fetches one URL and feeds its links back into the frontier
    ///
    /// A failed fetch is logged and abandoned: the URL is not marked visited
    /// and is not re-queued.
    async fn process_url(&mut self, url: Url) {
        self.attempts += 1;
        tracing::info!("Page {}: {}", self.attempts, url);

        match fetch_with_retry(&self.fetcher, &url, &self.retry).await {
            FetchResult::Success { body, .. } => {
                let links = extract_links_from_html(&body, &url, &self.domain_host);
                self.handle_discovered_links(url, links);
            }

            FetchResult::HttpError { status_code } => {
                self.pages_failed += 1;
                tracing::warn!("Error with {}: HTTP {}", url, status_code);
            }

            FetchResult::NetworkError { error, timed_out } => {
                self.pages_failed += 1;
                if timed_out {
                    tracing::warn!("Timeout with {}: {}", url, error);
                } else {
                    tracing::warn!("Error with {}: {}", url, error);
                }
            }
        }

        self.scheduler.record_completion(Instant::now());
    }

    /// Marks the page visited, records its links and queues the crawlable ones
    fn handle_discovered_links(&mut self, source: Url, links: Vec<Url>) {
        let state = self.scheduler.state_mut();
        state.mark_visited(source);
        self.pages_visited += 1;

        let new_links = state.record_discovered(&links);

        let mut queued = 0;
        for link in links {
            match classify_link(&link, &self.domain_host, &self.excluded) {
                LinkClassification::Visitable => {
                    if self.scheduler.add_to_frontier(link) {
                        queued += 1;
                    }
                }
                LinkClassification::Excluded => {
                    tracing::trace!("Not queueing excluded link {}", link);
                }
                LinkClassification::External => {}
            }
        }

        tracing::debug!(
            "{} new links, {} queued, {} in frontier",
            new_links,
            queued,
            self.scheduler.frontier_size()
        );
    }
}

/// Builds an HTTP coordinator from configuration and runs it
///
/// # Example
///
/// ```no_run
/// use month_links::config::Config;
/// use month_links::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::for_site("https://example.com/");
/// let report = run_crawl(&config, std::future::pending()).await?;
/// println!("{} links", report.discovered.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl<S>(config: &Config, shutdown: S) -> crate::Result<CrawlReport>
where
    S: Future<Output = ()>,
{
    let coordinator = Coordinator::from_config(config)?;
    Ok(coordinator.run_until(shutdown).await)
}
