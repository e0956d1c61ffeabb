use serde::Deserialize;

/// Browser-like User-Agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// File extensions that are never fetched (matched case-insensitively)
pub const DEFAULT_EXCLUDED_EXTENSIONS: &[&str] = &[
    "pdf", "jpg", "jpeg", "png", "gif", "zip", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "mp4",
    "avi", "mov", "mp3", "wav",
];

/// Target months in enumeration order, each with its numeric and bilingual tokens
pub const DEFAULT_TARGET_MONTHS: &[(&str, &[&str])] = &[
    ("janvier", &["01", "1", "janvier", "january"]),
    ("février", &["02", "2", "février", "february"]),
    ("mars", &["03", "3", "mars", "march"]),
    ("novembre", &["11", "novembre", "november"]),
    ("décembre", &["12", "décembre", "december"]),
];

/// Main configuration structure for Month-Links
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub filter: FilterConfig,
    #[serde(rename = "month")]
    pub months: Vec<MonthEntry>,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            filter: FilterConfig::default(),
            months: DEFAULT_TARGET_MONTHS
                .iter()
                .map(|(id, tokens)| MonthEntry {
                    id: id.to_string(),
                    tokens: tokens.iter().map(|t| t.to_string()).collect(),
                })
                .collect(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Builds the default configuration for the given site
    pub fn for_site(base_url: &str) -> Self {
        let mut config = Self::default();
        config.crawler.base_url = base_url.to_string();
        config
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// The site to crawl; its host bounds the crawl
    pub base_url: String,

    /// Pause between successive fetch attempts (milliseconds)
    pub delay_ms: u64,

    /// Per-request timeout (seconds)
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Extra attempts for transient failures; 0 keeps the at-most-once policy
    pub max_retries: u32,

    /// Pause before each retry (milliseconds)
    pub retry_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            delay_ms: 500,
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: 0,
            retry_delay_ms: 1000,
        }
    }
}

/// Frontier admission filters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FilterConfig {
    /// Extensions (with or without the leading dot) that are never fetched
    pub excluded_extensions: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_extensions: DEFAULT_EXCLUDED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

/// One target month and the tokens that identify it
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MonthEntry {
    /// Canonical month identifier (e.g. "janvier")
    pub id: String,

    /// Numeric codes and localized names
    pub tokens: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path of the filtered link list
    pub path: String,

    /// How many filtered links to echo in the summary
    pub sample_size: usize,

    /// Optional log file written alongside console output
    pub log_file: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "liens_filtres.txt".to_string(),
            sample_size: 10,
            log_file: None,
        }
    }
}
