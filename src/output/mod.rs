//! Output module for persisting and reporting crawl results
//!
//! This module handles:
//! - Writing the filtered link list (the result sink)
//! - Logging totals, per-month statistics and a sample of links
//! - Deciding, once the crawl is over, whether anything gets written

pub mod stats;
mod text_file;
mod traits;

pub use stats::{log_summary, summary_lines};
pub use text_file::TextFileSink;
pub use traits::{OutputError, OutputResult, ResultSink};

use crate::crawler::CrawlReport;
use crate::months::{FilterResult, MonthMatcher};

/// Writes the filtered links through a sink, logging the outcome
///
/// A write failure is logged as an error and returned; the caller keeps the
/// in-memory result either way.
pub fn save_links(sink: &dyn ResultSink, result: &FilterResult) -> OutputResult<usize> {
    match sink.write_links(&result.links) {
        Ok(count) => {
            tracing::info!("{} links saved to {}", count, sink.describe());
            Ok(count)
        }
        Err(e) => {
            tracing::error!("Failed to save links to {}: {}", sink.describe(), e);
            Err(e)
        }
    }
}

/// Filters a finished crawl, writes the matching links and logs the summary
///
/// Returns the number of links written, or None when no file was produced:
/// - the crawl was interrupted and `save_partial` is off
/// - no link matched a target month
/// - the sink failed (the error is logged, the statistics still are)
pub fn finish_run(
    report: &CrawlReport,
    matcher: &MonthMatcher,
    sink: &dyn ResultSink,
    save_partial: bool,
    sample_size: usize,
) -> Option<usize> {
    if report.interrupted && !save_partial {
        tracing::warn!("Crawl interrupted; no output written (use --save-partial to keep results)");
        return None;
    }

    let result = matcher.apply(report.discovered_sorted());

    if result.is_empty() {
        log_summary(report, &result, sample_size);
        tracing::warn!("No output file written");
        return None;
    }

    // save_links already reported the failure
    let written = save_links(sink, &result).ok();
    log_summary(report, &result, sample_size);
    written
}
