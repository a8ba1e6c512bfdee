/// Error types for the RWQ core library
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to build a working set from a data source.
///
/// Always fatal: no partial working set is produced.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be opened or read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not structurally valid delimited text
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Required column missing from header: {0}")]
    MissingColumn(&'static str),
}

/// Criteria rejected by the filter engine.
///
/// Recoverable: the caller should re-prompt rather than give up.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCriteria {
    /// The station does not occur in the working set
    #[error("Unknown station: {0}")]
    UnknownStation(String),

    /// The interval start lies after its end
    #[error("Invalid date interval: start {start} is after end {end}")]
    InvertedInterval { start: NaiveDate, end: NaiveDate },
}

/// Main error type for RWQ core operations
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    InvalidCriteria(#[from] InvalidCriteria),
}

/// Type alias for Results using the core Error
pub type Result<T> = std::result::Result<T, Error>;
