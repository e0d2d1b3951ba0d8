//! Floor-area unit conversion and provenance.

use listings_common::{column_f64_values, round_half_even};
use listings_model::columns::{SQUARE_FEET, SQUARE_METERS, SQUARE_METERS_IMPUTED};
use polars::prelude::{Column, DataFrame};

use crate::error::{Result, TransformError};
use crate::imputation::MissingMask;
use crate::summary::DistributionSummary;

/// Converted floor areas, split by provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaSummary {
    pub all: Option<DistributionSummary>,
    pub observed: Option<DistributionSummary>,
    pub imputed: Option<DistributionSummary>,
}

/// Rescales a completed floor-area column and stamps where each value came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaConversion<'a> {
    pub source: &'a str,
    pub target: &'a str,
    pub flag: &'a str,
    pub factor: f64,
}

impl AreaConversion<'static> {
    /// `square_feet` → `square_meters` plus `square_meters_imputed`.
    pub fn square_feet_to_meters(factor: f64) -> Self {
        Self {
            source: SQUARE_FEET,
            target: SQUARE_METERS,
            flag: SQUARE_METERS_IMPUTED,
            factor,
        }
    }
}

impl AreaConversion<'_> {
    /// Adds the converted column (two decimals, ties to even) and the flag
    /// column, then drops the source.
    ///
    /// Every source value must be present; `mask` must cover every row.
    pub fn apply(&self, df: &mut DataFrame, mask: &MissingMask) -> Result<AreaSummary> {
        let values = column_f64_values(df, self.source).map_err(|_| {
            TransformError::ColumnNotFound {
                column: self.source.to_string(),
            }
        })?;
        if mask.len() != values.len() {
            return Err(TransformError::LengthMismatch {
                expected: values.len(),
                actual: mask.len(),
            });
        }
        let missing = values.iter().filter(|v| v.is_none()).count();
        if missing > 0 {
            return Err(TransformError::IncompleteColumn {
                column: self.source.to_string(),
                missing,
            });
        }

        let converted: Vec<f64> = values
            .iter()
            .flatten()
            .map(|v| round_half_even(v * self.factor, 2))
            .collect();

        let mut observed = Vec::new();
        let mut imputed = Vec::new();
        for (row, value) in converted.iter().enumerate() {
            if mask.is_missing(row) {
                imputed.push(*value);
            } else {
                observed.push(*value);
            }
        }
        let summary = AreaSummary {
            all: DistributionSummary::from_values(&converted),
            observed: DistributionSummary::from_values(&observed),
            imputed: DistributionSummary::from_values(&imputed),
        };

        df.with_column(Column::new(self.target.into(), converted))?;
        df.with_column(mask.to_column(self.flag))?;
        df.drop_in_place(self.source)?;

        tracing::debug!(
            source = self.source,
            target = self.target,
            factor = self.factor,
            "converted floor areas"
        );
        Ok(summary)
    }
}
