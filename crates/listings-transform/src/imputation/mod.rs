//! Floor-area imputation.
//!
//! - [`detector`]: coercion and the pre-imputation [`MissingMask`]
//! - [`stats`]: stratum keys and the finalized [`StratumTables`]
//! - [`resolver`]: the ordered [`FallbackChain`]
//! - [`imputer`]: the seeded [`HierarchicalImputer`]
//!
//! [`impute_floor_area`] applies all of it to a DataFrame column.

pub mod detector;
pub mod imputer;
pub mod resolver;
pub mod stats;

use std::collections::BTreeMap;

use listings_common::column_string_values;
use listings_model::StratumLevel;
use listings_model::columns::{NEIGHBOURHOOD, PROPERTY_TYPE, SQUARE_FEET};
use polars::prelude::{Column, DataFrame};
use rand::Rng;

pub use detector::{MissingMask, coerce_column, is_missing};
pub use imputer::{HierarchicalImputer, ImputationOutcome, ImputedValue};
pub use resolver::{FallbackChain, Resolution, lookup_level};
pub use stats::{
    LevelCoverage, ListingKeys, StratumKey, StratumStats, StratumTables, StratumTablesBuilder,
};

use crate::error::{Result, TransformError};

/// Columns the imputation reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImputationColumns<'a> {
    pub property_type: &'a str,
    pub district: &'a str,
    pub floor_area: &'a str,
}

impl Default for ImputationColumns<'static> {
    fn default() -> Self {
        Self {
            property_type: PROPERTY_TYPE,
            district: NEIGHBOURHOOD,
            floor_area: SQUARE_FEET,
        }
    }
}

/// What the imputation stage did.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationReport {
    pub rows: usize,
    pub missing: usize,
    pub observed: usize,
    pub level_counts: BTreeMap<StratumLevel, usize>,
    /// Group counts per level; empty when nothing was imputed.
    pub coverage: Vec<LevelCoverage>,
    pub global: Option<StratumStats>,
    pub mask: MissingMask,
}

/// Grouping keys for every row.
pub fn listing_keys(df: &DataFrame, columns: &ImputationColumns<'_>) -> Result<Vec<ListingKeys>> {
    let read = |name: &str| {
        column_string_values(df, name).map_err(|_| TransformError::ColumnNotFound {
            column: name.to_string(),
        })
    };
    let property_types = read(columns.property_type)?;
    let districts = read(columns.district)?;

    Ok(property_types
        .into_iter()
        .zip(districts)
        .map(|(property_type, district)| ListingKeys {
            property_type,
            district,
        })
        .collect())
}

/// Fills missing floor areas in place and returns the pre-imputation mask.
///
/// The floor-area column becomes Float64 with no nulls. Row count and order
/// are unchanged.
pub fn impute_floor_area<R: Rng + ?Sized>(
    df: &mut DataFrame,
    columns: &ImputationColumns<'_>,
    imputer: &HierarchicalImputer,
    rng: &mut R,
) -> Result<ImputationReport> {
    let values = coerce_column(df, columns.floor_area)?;
    let keys = listing_keys(df, columns)?;

    let outcome = imputer.impute(&keys, &values, rng)?;
    let level_counts = outcome.level_counts();
    let (coverage, global) = match &outcome.tables {
        Some(tables) => (
            tables.coverage(imputer.options().min_support),
            Some(*tables.global()),
        ),
        None => (Vec::new(), None),
    };

    df.with_column(Column::new(columns.floor_area.into(), outcome.values))?;

    let report = ImputationReport {
        rows: df.height(),
        missing: outcome.mask.missing_count(),
        observed: outcome.mask.observed_count(),
        level_counts,
        coverage,
        global,
        mask: outcome.mask,
    };
    tracing::info!(
        rows = report.rows,
        missing = report.missing,
        observed = report.observed,
        "imputed missing floor areas"
    );
    Ok(report)
}
