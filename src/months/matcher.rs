use crate::months::spec::MonthSpec;
use crate::ConfigError;
use percent_encoding::percent_decode_str;
use regex::Regex;
use std::collections::HashSet;

/// Dated segments restricted to January-March, November and December
///
/// The month alternation mirrors the target set and must not be
/// widened to the other seven months.
const STRUCTURED_DATE_PATTERNS: &[&str] = &[
    r"/(\d{4})/(0?[1-3]|11|12)/",
    r"/(\d{4})-(0?[1-3]|11|12)-",
    r"(\d{4})/(0?[1-3]|11|12)/",
    r"(\d{4})-(0?[1-3]|11|12)-",
];

/// Any dated segment; the captured code is compared with numeric tokens
const DATE_SEGMENT_PATTERNS: &[&str] = &[r"\d{4}/(\d{1,2})/", r"\d{4}-(\d{1,2})-"];

/// Classifies URLs as month-relevant and tallies them per month
///
/// Matching is stateless: the same input always yields the same output.
#[derive(Debug, Clone)]
pub struct MonthMatcher {
    spec: MonthSpec,
    structured: Vec<Regex>,
    segments: Vec<Regex>,
}

impl MonthMatcher {
    /// Compiles the date patterns for the given month table
    pub fn new(spec: MonthSpec) -> Result<Self, ConfigError> {
        Ok(Self {
            spec,
            structured: compile(STRUCTURED_DATE_PATTERNS)?,
            segments: compile(DATE_SEGMENT_PATTERNS)?,
        })
    }

    /// Matcher over the default five target months
    pub fn with_default_months() -> Result<Self, ConfigError> {
        Self::new(MonthSpec::default())
    }

    /// The month table this matcher uses
    pub fn spec(&self) -> &MonthSpec {
        &self.spec
    }

    /// Returns true if the URL refers to one of the target months
    ///
    /// Either a structured date segment matches, or the lowercased URL holds
    /// one of the month tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// use month_links::months::MonthMatcher;
    ///
    /// let matcher = MonthMatcher::with_default_months().unwrap();
    /// assert!(matcher.contains_target_month("https://site.com/2024/03/news"));
    /// assert!(!matcher.contains_target_month("https://site.com/2024/07/news"));
    /// assert!(matcher.contains_target_month("https://site.com/blog/novembre-news"));
    /// ```
    pub fn contains_target_month(&self, url: &str) -> bool {
        if self.structured.iter().any(|re| re.is_match(url)) {
            return true;
        }

        self.matching_month(url).is_some()
    }

    /// Returns the first month, in enumeration order, whose tokens match
    ///
    /// Name tokens match as substrings of the lowercased, percent-decoded URL,
    /// so `f%C3%A9vrier` counts as `février`. Numeric tokens
    /// match only as the month code of a dated segment (`YYYY/MM/` or
    /// `YYYY-MM-`), so the digits of a year or an id never count.
    pub fn matching_month(&self, url: &str) -> Option<&str> {
        let lowered = percent_decode_str(url).decode_utf8_lossy().to_lowercase();
        let codes = self.month_codes(url);

        self.spec
            .months()
            .iter()
            .find(|month| {
                month.numeric_codes.iter().any(|code| codes.contains(code.as_str()))
                    || month.names.iter().any(|name| lowered.contains(name.as_str()))
            })
            .map(|month| month.id.as_str())
    }

    /// Keeps the URLs that refer to a target month, preserving input order
    pub fn filter_by_month<I, S>(&self, urls: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        urls.into_iter()
            .filter(|url| self.contains_target_month(url.as_ref()))
            .map(|url| url.as_ref().to_string())
            .collect()
    }

    /// Counts URLs per month; each URL counts once, under its first match
    ///
    /// URLs accepted by the structured pattern alone (no token match) are not
    /// attributed to any month.
    pub fn compute_statistics<I, S>(&self, filtered: I) -> MonthStatistics
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut stats = MonthStatistics::empty(&self.spec);
        for url in filtered {
            if let Some(id) = self.matching_month(url.as_ref()) {
                stats.increment(id);
            }
        }
        stats
    }

    /// Filters the URLs and tallies the survivors in one pass
    pub fn apply<I, S>(&self, urls: I) -> FilterResult
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let links = self.filter_by_month(urls);
        let statistics = self.compute_statistics(&links);
        FilterResult { links, statistics }
    }

    /// Month codes of every dated segment in the URL
    fn month_codes<'u>(&self, url: &'u str) -> HashSet<&'u str> {
        self.segments
            .iter()
            .flat_map(|re| re.captures_iter(url))
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }
}

fn compile(patterns: &[&str]) -> Result<Vec<Regex>, ConfigError> {
    patterns
        .iter()
        .map(|p| Regex::new(p).map_err(|e| ConfigError::InvalidPattern(e.to_string())))
        .collect()
}

/// Month-relevant links and their per-month counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterResult {
    /// Matching URLs, in input order
    pub links: Vec<String>,

    /// Counts per month
    pub statistics: MonthStatistics,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }
}

/// Match counts per month, in enumeration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthStatistics {
    counts: Vec<(String, usize)>,
}

impl MonthStatistics {
    /// All months at zero
    pub fn empty(spec: &MonthSpec) -> Self {
        Self {
            counts: spec.ids().map(|id| (id.to_string(), 0)).collect(),
        }
    }

    fn increment(&mut self, id: &str) {
        if let Some((_, count)) = self.counts.iter_mut().find(|(month, _)| month == id) {
            *count += 1;
        }
    }

    /// Count for one month, or None for an unknown identifier
    pub fn get(&self, id: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(month, _)| month == id)
            .map(|(_, count)| *count)
    }

    /// (month, count) pairs in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(month, count)| (month.as_str(), *count))
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}
