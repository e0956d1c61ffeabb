use crate::config::types::Config;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Parses configuration from TOML text
///
/// Missing sections and keys fall back to the built-in defaults. The result is
/// not validated yet: command-line overrides are applied first, then
/// [`validate`](crate::config::validate) runs on the final configuration.
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use month_links::config::load_config;
///
/// let config = load_config(Path::new("month-links.toml")).unwrap();
/// println!("Delay: {}ms", config.crawler.delay_ms);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a result file can be traced back to the
/// configuration that produced it.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let config_content = r#"
[crawler]
base-url = "https://example.com/"
delay-ms = 250
timeout-secs = 5
user-agent = "TestCrawler/1.0"
max-retries = 2
retry-delay-ms = 100

[filter]
excluded-extensions = ["pdf", ".zip"]

[[month]]
id = "mars"
tokens = ["03", "3", "mars", "march"]

[[month]]
id = "avril"
tokens = ["avril", "april"]

[output]
path = "out.txt"
sample-size = 3
log-file = "run.log"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.base_url, "https://example.com/");
        assert_eq!(config.crawler.delay_ms, 250);
        assert_eq!(config.crawler.timeout_secs, 5);
        assert_eq!(config.crawler.max_retries, 2);
        assert_eq!(config.filter.excluded_extensions, vec!["pdf", ".zip"]);
        assert_eq!(config.months.len(), 2);
        assert_eq!(config.months[1].id, "avril");
        assert_eq!(config.output.path, "out.txt");
        assert_eq!(config.output.sample_size, 3);
        assert_eq!(config.output.log_file.as_deref(), Some("run.log"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let file = create_temp_config("[crawler]\nbase-url = \"https://example.com/\"\n");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.delay_ms, 500);
        assert_eq!(config.crawler.timeout_secs, 15);
        assert_eq!(config.crawler.max_retries, 0);
        assert_eq!(config.filter.excluded_extensions.len(), 17);
        assert_eq!(config.months.len(), 5);
        assert_eq!(config.months[0].id, "janvier");
        assert_eq!(config.output.path, "liens_filtres.txt");
        assert_eq!(config.output.sample_size, 10);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result.unwrap_err(), ConfigError::Io(_)));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Parse(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_load_config_with_hash() {
        let file = create_temp_config("[output]\npath = \"x.txt\"\n");
        let (config, hash) = load_config_with_hash(file.path()).unwrap();
        assert_eq!(config.output.path, "x.txt");
        assert_eq!(hash.len(), 64);
    }
}
