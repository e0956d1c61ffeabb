//! Month-Links: a single-domain link harvester
//!
//! This crate crawls one website breadth-first, collects every internal
//! hyperlink, and keeps the links that point at the target calendar months
//! (dated path segments or localized month names).

pub mod config;
pub mod crawler;
pub mod months;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Month-Links operations
#[derive(Debug, Error)]
pub enum MonthLinksError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid month pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for Month-Links operations
pub type Result<T> = std::result::Result<T, MonthLinksError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlReport};
pub use months::{MonthMatcher, MonthSpec, MonthStatistics};
pub use state::CrawlState;
pub use crate::url::{extract_domain, is_excluded, is_same_domain, resolve, ExcludedExtensions};
