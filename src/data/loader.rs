use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use super::model::Record;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("opening {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("reading CSV headers")]
    Header(#[source] csv::Error),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV line {line}")]
    Row {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// RecordSource – a re-openable CSV file
// ---------------------------------------------------------------------------

/// A CSV file with a header row. Each call to [`RecordSource::records`]
/// starts again from the first data line.
#[derive(Debug, Clone)]
pub struct RecordSource {
    path: PathBuf,
}

impl RecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RecordSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open the file and read its header row.
    pub fn records(&self) -> Result<RecordReader, LoadError> {
        log::debug!("opening {}", self.path.display());
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .from_path(&self.path)
            .map_err(|source| LoadError::Open {
                path: self.path.clone(),
                source,
            })?;

        let headers: Arc<[String]> = reader
            .headers()
            .map_err(LoadError::Header)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(RecordReader {
            inner: reader.into_records(),
            headers,
        })
    }
}

// ---------------------------------------------------------------------------
// RecordReader – lazy iterator over data lines
// ---------------------------------------------------------------------------

/// Yields one [`Record`] per data line. Owns the file handle until dropped.
pub struct RecordReader {
    inner: csv::StringRecordsIntoIter<File>,
    headers: Arc<[String]>,
}

impl RecordReader {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Fail early if the header row lacks any of `columns`.
    pub fn require_columns(self, columns: &[&str]) -> Result<Self, LoadError> {
        let missing: Vec<String> = columns
            .iter()
            .filter(|c| !self.headers.iter().any(|h| h == *c))
            .map(|c| c.to_string())
            .collect();
        if missing.is_empty() {
            Ok(self)
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }
}

impl Iterator for RecordReader {
    type Item = Result<Record, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        Some(
            result
                .map_err(|source| LoadError::Row {
                    line: source.position().map_or(0, |p| p.line()),
                    source,
                })
                .map(|row| {
                    let line = row.position().map_or(0, |p| p.line());
                    let cells = row.iter().map(|cell| cell.trim().to_string()).collect();
                    Record::new(Arc::clone(&self.headers), cells, line)
                }),
        )
    }
}
