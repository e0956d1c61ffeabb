//! Configuration module for Month-Links
//!
//! The built-in defaults describe a complete run; an optional TOML file and
//! command-line flags override them before validation.
//!
//! # Example
//!
//! ```
//! use month_links::config::{validate, Config};
//!
//! let config = Config::for_site("https://example.com/");
//! validate(&config).unwrap();
//! assert_eq!(config.crawler.delay_ms, 500);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FilterConfig, MonthEntry, OutputConfig, DEFAULT_EXCLUDED_EXTENSIONS,
    DEFAULT_TARGET_MONTHS, DEFAULT_USER_AGENT,
};

// Re-export parser and validation functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{parse_base_url, validate};
