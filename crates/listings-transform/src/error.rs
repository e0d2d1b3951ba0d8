//! Error types for listings transformations.

use listings_model::OptionsError;
use thiserror::Error;

/// Errors raised by the transformation stages.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Every record is missing the attribute, so no reference distribution exists.
    #[error("no observed values to build a reference distribution from")]
    NoReferenceData,

    /// A stratum produced parameters the normal distribution rejects.
    #[error("invalid normal distribution (mean {mean}, std {std}): {message}")]
    InvalidDistribution { mean: f64, std: f64, message: String },

    /// A column handed to a later stage still has missing values.
    #[error("column '{column}' still has {missing} missing values")]
    IncompleteColumn { column: String, missing: usize },

    /// Parallel inputs disagree on the number of records.
    #[error("expected {expected} records, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Options failed validation.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        match err {
            polars::prelude::PolarsError::ColumnNotFound(name) => Self::ColumnNotFound {
                column: name.to_string(),
            },
            other => Self::DataFrame {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for transformation operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_from_polars() {
        let err: TransformError =
            polars::prelude::PolarsError::ColumnNotFound("square_feet".into()).into();
        assert!(matches!(err, TransformError::ColumnNotFound { .. }));
    }

    #[test]
    fn test_options_error_is_transparent() {
        let err: TransformError = OptionsError::MinSupport.into();
        assert_eq!(err.to_string(), "minimum support must be at least 1");
    }
}
