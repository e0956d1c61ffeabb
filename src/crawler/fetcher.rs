//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests returning the page body
//! - Error classification into fetch results
//! - The optional bounded retry policy

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// Whether the request hit the timeout
        timed_out: bool,
    },
}

impl FetchResult {
    /// Returns true for a successful fetch
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true for failures worth retrying: network errors and 5xx
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Success { .. } => false,
            Self::HttpError { status_code } => *status_code >= 500,
            Self::NetworkError { .. } => true,
        }
    }
}

/// Capability to GET a page
///
/// The coordinator only depends on this trait, so tests can drive a crawl
/// over an in-memory site.
#[allow(async_fn_in_trait)]
pub trait PageFetcher {
    /// Fetches one URL; failures are reported in the result, never raised
    async fn fetch(&self, url: &Url) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```
/// use month_links::config::CrawlerConfig;
/// use month_links::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an already configured client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds the client from crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url.as_str()).await
    }
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | Success with body |
/// | any other status | HttpError |
/// | timeout | NetworkError (timed_out) |
/// | connection / body error | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: e.is_timeout(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                    timed_out: true,
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: format!("Connection failed: {}", e),
                    timed_out: false,
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                    timed_out: false,
                }
            }
        }
    }
}

/// Bounded retry policy for transient fetch failures
///
/// The default (`max_retries = 0`) makes exactly one attempt per URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first one
    pub max_retries: u32,

    /// Pause before each extra attempt
    pub retry_delay: Duration,
}

impl RetryPolicy {
    /// Single attempt, no retry
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

/// Fetches a URL, retrying transient failures as the policy allows
///
/// Returns the last result; the whole sequence is one attempt from the
/// frontier's point of view.
pub async fn fetch_with_retry<F: PageFetcher>(
    fetcher: &F,
    url: &Url,
    policy: &RetryPolicy,
) -> FetchResult {
    let mut result = fetcher.fetch(url).await;
    let mut retries = 0;

    while result.is_transient() && retries < policy.max_retries {
        retries += 1;
        tracing::debug!(
            "Retrying {} ({}/{}) after {:?}",
            url,
            retries,
            policy.max_retries,
            policy.retry_delay
        );
        tokio::time::sleep(policy.retry_delay).await;
        result = fetcher.fetch(url).await;
    }

    result
}
