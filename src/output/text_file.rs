//! Plain-text link list
//!
//! One absolute URL per line, sorted lexicographically, UTF-8. The file is
//! written to a temporary sibling and renamed into place, so readers never see
//! a half-written list.

use crate::output::traits::{OutputError, OutputResult, ResultSink};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// [`ResultSink`] writing a sorted text file
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for TextFileSink {
    fn write_links(&self, links: &[String]) -> OutputResult<usize> {
        let mut sorted: Vec<&str> = links.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = NamedTempFile::new_in(dir).map_err(|source| OutputError::Open {
            path: self.path.clone(),
            source,
        })?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            for link in &sorted {
                writeln!(writer, "{}", link)?;
            }
            writer.flush()?;
        }

        temp.persist(&self.path)
            .map_err(|e| OutputError::Write(format!("{}: {}", self.path.display(), e.error)))?;

        Ok(sorted.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
