use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("sample fraction must be in (0, 1], got {0}")]
    SampleFraction(f64),
    #[error("sample row count must be positive")]
    SampleRows,
    #[error("minimum support must be at least 1")]
    MinSupport,
    #[error("standard deviation floor must be a positive finite number, got {0}")]
    StdFloor(f64),
    #[error("minimum imputed value must be a non-negative finite number, got {0}")]
    MinValue(f64),
    #[error("unit conversion factor must be a positive finite number, got {0}")]
    ConversionFactor(f64),
    #[error("premium amenity ratio must be in [0, 1], got {0}")]
    PremiumRatio(f64),
    #[error("column selection must not be empty")]
    NoColumns,
    #[error("required column '{0}' is missing from the column selection")]
    RequiredColumn(String),
}

pub type Result<T> = std::result::Result<T, OptionsError>;
