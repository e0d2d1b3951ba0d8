//! Missing floor-area detection.

use listings_common::column_f64_values;
use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TransformError};

/// Reads `column` as numbers.
///
/// Text that does not parse, and non-finite values, become `None`. This is
/// a local recovery: coercion never fails for a present column.
pub fn coerce_column(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    column_f64_values(df, column).map_err(|_| TransformError::ColumnNotFound {
        column: column.to_string(),
    })
}

/// A value needs imputation when it is absent, zero, or not finite.
pub fn is_missing(value: Option<f64>) -> bool {
    value.is_none_or(|v| v == 0.0 || !v.is_finite())
}

/// Per-record flag: true when the value was missing before imputation.
///
/// Built once from the coerced column and never recomputed, so it keeps
/// describing the raw input after values are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingMask {
    flags: Vec<bool>,
}

impl MissingMask {
    pub fn detect(values: &[Option<f64>]) -> Self {
        Self {
            flags: values.iter().map(|value| is_missing(*value)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_missing(&self, row: usize) -> bool {
        self.flags.get(row).copied().unwrap_or(false)
    }

    pub fn missing_count(&self) -> usize {
        self.flags.iter().filter(|flag| **flag).count()
    }

    pub fn observed_count(&self) -> usize {
        self.len() - self.missing_count()
    }

    /// Rows to impute, in natural order.
    pub fn missing_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(row, flag)| flag.then_some(row))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.flags
    }

    /// Boolean column carrying the flags.
    pub fn to_column(&self, name: &str) -> Column {
        Column::new(name.into(), self.flags.as_slice())
    }
}
