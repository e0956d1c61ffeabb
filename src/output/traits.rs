//! Output handler traits and types
//!
//! This module defines the trait interface for result sinks and the error
//! type they report.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to open {path} for writing: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the final filtered link list
///
/// Implementations receive the links unordered and are responsible for
/// whatever ordering their format needs.
pub trait ResultSink {
    /// Persists the links, returning how many were written
    fn write_links(&self, links: &[String]) -> OutputResult<usize>;

    /// Human-readable description of the destination, for logs
    fn describe(&self) -> String;
}
