//! Ingestion errors.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Loading, reducing, or writing a listings frame failed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("listings export not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot access {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is {size} bytes, over the {max_size} byte limit")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Output directory could not be created.
    #[error("cannot create {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path} as CSV: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Header row present but no listings.
    #[error("no listings in {path}")]
    EmptyCsv { path: PathBuf },

    #[error("cannot write {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    /// A configured column is absent from the export.
    #[error("column '{column}' is not in the listings export")]
    ColumnNotFound { column: String },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<PolarsError> for IngestError {
    fn from(err: PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/listings.csv"),
        };
        assert_eq!(
            err.to_string(),
            "listings export not found: /data/listings.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = PolarsError::ColumnNotFound("price".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
