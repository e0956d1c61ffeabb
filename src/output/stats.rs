//! Console summary of a run
//!
//! Totals, per-month counts and a short sample of the filtered links, logged
//! through `tracing` so they land in the console and the optional log file.

use crate::crawler::CrawlReport;
use crate::months::FilterResult;

/// Builds the summary lines for a finished crawl
///
/// The sample shows at most `sample_size` filtered links, in the order they
/// were written (sorted).
pub fn summary_lines(report: &CrawlReport, result: &FilterResult, sample_size: usize) -> Vec<String> {
    let mut lines = vec![
        "Extraction results:".to_string(),
        format!("  - Pages visited: {}", report.pages_visited),
        format!("  - Failed fetches: {}", report.pages_failed),
        format!("  - Total links found: {}", report.discovered.len()),
        format!("  - Filtered links: {}", result.len()),
    ];

    if result.is_empty() {
        return lines;
    }

    lines.push("Statistics by month:".to_string());
    for (month, count) in result.statistics.iter() {
        lines.push(format!("  - {}: {} links", capitalize(month), count));
    }

    let mut sample: Vec<&str> = result.links.iter().map(String::as_str).collect();
    sample.sort_unstable();
    sample.truncate(sample_size);

    if !sample.is_empty() {
        lines.push("Sample of saved links:".to_string());
        for (i, link) in sample.iter().enumerate() {
            lines.push(format!("  {}. {}", i + 1, link));
        }
    }

    lines
}

/// Logs the summary at info level
pub fn log_summary(report: &CrawlReport, result: &FilterResult, sample_size: usize) {
    for line in summary_lines(report, result, sample_size) {
        tracing::info!("{}", line);
    }

    if result.is_empty() {
        tracing::warn!("No link matches the target months");
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
