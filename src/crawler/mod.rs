//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` trait, with optional retries
//! - HTML parsing and same-domain link extraction
//! - Frontier scheduling and request pacing
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlOptions, CrawlReport};
pub use fetcher::{
    build_http_client, fetch_url, fetch_with_retry, FetchResult, HttpFetcher, PageFetcher,
    RetryPolicy,
};
pub use parser::{extract_links, extract_links_from_html, parse_html};
pub use scheduler::Scheduler;
