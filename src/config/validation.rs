use crate::config::types::{Config, CrawlerConfig, FilterConfig, MonthEntry, OutputConfig};
use crate::{ConfigError, ConfigResult};
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
///
/// Runs before any network activity; a failure here is fatal.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crawler_config(&config.crawler)?;
    validate_filter_config(&config.filter)?;
    validate_months(&config.months)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Parses the base URL and checks that it can bound a crawl
pub fn parse_base_url(base_url: &str) -> ConfigResult<Url> {
    if base_url.trim().is_empty() {
        return Err(ConfigError::Validation(
            "base-url is required".to_string(),
        ));
    }

    let url = Url::parse(base_url.trim())
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use HTTP or HTTPS, got {}",
            base_url,
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            base_url
        )));
    }

    Ok(url)
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> ConfigResult<()> {
    parse_base_url(&config.base_url)?;

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the excluded extension list
fn validate_filter_config(config: &FilterConfig) -> ConfigResult<()> {
    if config.excluded_extensions.is_empty() {
        return Err(ConfigError::Validation(
            "excluded-extensions cannot be empty".to_string(),
        ));
    }

    for ext in &config.excluded_extensions {
        let bare = ext.trim_start_matches('.');
        if bare.is_empty() || bare.contains('/') {
            return Err(ConfigError::InvalidPattern(format!(
                "Invalid excluded extension '{}'",
                ext
            )));
        }
    }

    Ok(())
}

/// Validates the target month table
fn validate_months(months: &[MonthEntry]) -> ConfigResult<()> {
    if months.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[month]] entry is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for month in months {
        if month.id.trim().is_empty() {
            return Err(ConfigError::InvalidPattern(
                "Month id cannot be empty".to_string(),
            ));
        }

        if !seen.insert(month.id.as_str()) {
            return Err(ConfigError::InvalidPattern(format!(
                "Duplicate month id '{}'",
                month.id
            )));
        }

        if month.tokens.is_empty() {
            return Err(ConfigError::InvalidPattern(format!(
                "Month '{}' must have at least one token",
                month.id
            )));
        }

        if month.tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidPattern(format!(
                "Month '{}' has an empty token",
                month.id
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if config.path.is_empty() {
        return Err(ConfigError::Validation(
            "output path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
