//! CSV file reading.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, PolarsError, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Largest export [`read_listings_csv`] accepts (2 GiB).
pub const MAX_CSV_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Fails unless `path` exists and is at most [`MAX_CSV_FILE_SIZE`] bytes.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(source) if source.kind() == ErrorKind::NotFound => {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if size > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }
    Ok(())
}

/// Reads a listings export into a Polars DataFrame.
///
/// Schema inference is disabled, so every column arrives as `String` and
/// empty cells as null. Numeric coercion is left to the stages that need it,
/// which keeps unparseable cells recoverable instead of failing the load.
pub fn read_listings_csv(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;

    let parse_error = |err: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    };
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(SerReader::finish)
        .map_err(parse_error)?;

    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded listings export"
    );
    Ok(df)
}
