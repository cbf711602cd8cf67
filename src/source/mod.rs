//! Record sources: where the dashboard's full record set comes from.
//!
//! The pipeline never touches storage. Each request asks a `RecordSource`
//! for a fresh, complete record set and either gets one (possibly empty)
//! or a `SourceError`. A missing backing file is reported as
//! `SourceError::NotFound` so callers can tell "no data file" apart from
//! "a data file with no rows".

mod csv_file;

use std::path::PathBuf;

use thiserror::Error;

use crate::models::IcuRecord;

pub use csv_file::CsvRecordSource;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{} not found.", display_name(.path))]
    NotFound { path: PathBuf },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Invalid value for {column} on line {line}: {value:?}")]
    InvalidValue {
        column: &'static str,
        line: u64,
        value: String,
    },
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// Supplies the complete, unfiltered record set for one request.
pub trait RecordSource: Send + Sync {
    fn load(&self) -> Result<Vec<IcuRecord>, SourceError>;
}

/// A fixed record set held in memory, or a source whose data is missing.
#[derive(Debug, Clone)]
pub enum InMemorySource {
    Records(Vec<IcuRecord>),
    Missing(PathBuf),
}

impl InMemorySource {
    pub fn new(records: Vec<IcuRecord>) -> Self {
        Self::Records(records)
    }

    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self::Missing(path.into())
    }
}

impl RecordSource for InMemorySource {
    fn load(&self) -> Result<Vec<IcuRecord>, SourceError> {
        match self {
            Self::Records(records) => Ok(records.clone()),
            Self::Missing(path) => Err(SourceError::NotFound { path: path.clone() }),
        }
    }
}
