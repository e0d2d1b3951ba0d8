//! Hierarchical floor-area imputation.

use std::collections::BTreeMap;

use listings_model::{ImputationOptions, StratumLevel};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use super::detector::MissingMask;
use super::resolver::FallbackChain;
use super::stats::{ListingKeys, StratumStats, StratumTables};
use crate::error::{Result, TransformError};

/// One filled-in value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImputedValue {
    pub row: usize,
    pub level: StratumLevel,
    /// The raw normal draw, before rounding and clamping.
    pub draw: f64,
    pub value: f64,
}

/// Completed column plus the provenance of every filled value.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputationOutcome {
    pub values: Vec<f64>,
    /// Flags computed from the input, before any value was filled.
    pub mask: MissingMask,
    pub imputed: Vec<ImputedValue>,
    /// `None` when nothing needed imputing.
    pub tables: Option<StratumTables>,
}

impl ImputationOutcome {
    /// Imputations per selected level, in fallback order.
    pub fn level_counts(&self) -> BTreeMap<StratumLevel, usize> {
        let mut counts = BTreeMap::new();
        for imputed in &self.imputed {
            *counts.entry(imputed.level).or_default() += 1;
        }
        counts
    }
}

/// Replaces missing values with draws from the most specific stratum that
/// has enough support.
///
/// Statistics are computed from every observed record before the first
/// draw. Draws happen in row order against the generator the caller passes
/// in, so a seeded generator over the same input reproduces every value.
#[derive(Debug, Clone)]
pub struct HierarchicalImputer {
    options: ImputationOptions,
    chain: FallbackChain,
}

impl HierarchicalImputer {
    pub fn new(options: ImputationOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            chain: FallbackChain::default(),
        })
    }

    pub fn with_chain(mut self, chain: FallbackChain) -> Self {
        self.chain = chain;
        self
    }

    pub fn options(&self) -> &ImputationOptions {
        &self.options
    }

    pub fn chain(&self) -> &FallbackChain {
        &self.chain
    }

    /// Detects missing values, builds the tables, and fills every gap.
    pub fn impute<R: Rng + ?Sized>(
        &self,
        keys: &[ListingKeys],
        values: &[Option<f64>],
        rng: &mut R,
    ) -> Result<ImputationOutcome> {
        if keys.len() != values.len() {
            return Err(TransformError::LengthMismatch {
                expected: values.len(),
                actual: keys.len(),
            });
        }

        let mask = MissingMask::detect(values);
        if mask.missing_count() == 0 {
            return Ok(ImputationOutcome {
                values: values.iter().map(|v| v.unwrap_or_default()).collect(),
                mask,
                imputed: Vec::new(),
                tables: None,
            });
        }

        let tables = StratumTables::from_records(keys, values, &mask, self.options.std_floor)?;
        let global = tables.global();
        tracing::debug!(
            observed = mask.observed_count(),
            missing = mask.missing_count(),
            global_mean = global.mean,
            global_std = global.std,
            "built stratum tables"
        );

        let (filled, imputed) = self.fill(keys, values, &mask, &tables, rng)?;
        Ok(ImputationOutcome {
            values: filled,
            mask,
            imputed,
            tables: Some(tables),
        })
    }

    /// Fills the rows `mask` flags using finalized `tables`.
    pub fn fill<R: Rng + ?Sized>(
        &self,
        keys: &[ListingKeys],
        values: &[Option<f64>],
        mask: &MissingMask,
        tables: &StratumTables,
        rng: &mut R,
    ) -> Result<(Vec<f64>, Vec<ImputedValue>)> {
        if mask.len() != values.len() || keys.len() != values.len() {
            return Err(TransformError::LengthMismatch {
                expected: values.len(),
                actual: mask.len().min(keys.len()),
            });
        }

        let mut filled: Vec<f64> = values.iter().map(|v| v.unwrap_or_default()).collect();
        let mut imputed = Vec::with_capacity(mask.missing_count());

        for row in mask.missing_rows() {
            let resolution = self
                .chain
                .resolve(&keys[row], tables, self.options.min_support);
            let (draw, value) = self.draw(&resolution.stats, rng)?;
            filled[row] = value;
            tracing::trace!(
                row,
                level = %resolution.level,
                support = resolution.stats.support,
                draw,
                value,
                "imputed floor area"
            );
            imputed.push(ImputedValue {
                row,
                level: resolution.level,
                draw,
                value,
            });
        }

        Ok((filled, imputed))
    }

    /// One normal draw, rounded half to even and clamped to the minimum.
    pub fn draw<R: Rng + ?Sized>(&self, stats: &StratumStats, rng: &mut R) -> Result<(f64, f64)> {
        let normal =
            Normal::new(stats.mean, stats.std).map_err(|e| TransformError::InvalidDistribution {
                mean: stats.mean,
                std: stats.std,
                message: e.to_string(),
            })?;
        let draw = normal.sample(rng);
        let value = draw.round_ties_even().max(self.options.min_value);
        Ok((draw, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn imputer() -> HierarchicalImputer {
        HierarchicalImputer::new(ImputationOptions::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_options() {
        let err = HierarchicalImputer::new(ImputationOptions::default().with_min_support(0))
            .unwrap_err();
        assert!(matches!(err, TransformError::Options(_)));
    }

    #[test]
    fn test_nothing_missing_leaves_values() {
        let keys = vec![ListingKeys::new(Some("Loft"), Some("Gràcia")); 2];
        let values = vec![Some(400.0), Some(600.0)];
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = imputer().impute(&keys, &values, &mut rng).unwrap();

        assert_eq!(outcome.values, vec![400.0, 600.0]);
        assert!(outcome.imputed.is_empty());
        assert!(outcome.tables.is_none());
    }

    #[test]
    fn test_draw_is_clamped_and_integral() {
        let stats = StratumStats {
            mean: -500.0,
            std: 10.0,
            support: 3,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let (draw, value) = imputer().draw(&stats, &mut rng).unwrap();
        assert!(draw < 0.0);
        assert_eq!(value, 10.0);

        let stats = StratumStats {
            mean: 800.0,
            std: 10.0,
            support: 3,
        };
        let (_, value) = imputer().draw(&stats, &mut rng).unwrap();
        assert_eq!(value.fract(), 0.0);
    }

    #[test]
    fn test_level_counts() {
        let mut keys = vec![ListingKeys::new(Some("Loft"), Some("Gràcia")); 6];
        keys.push(ListingKeys::new(Some("Castle"), Some("Les Corts")));
        keys.push(ListingKeys::new(Some("Loft"), Some("Gràcia")));
        let mut values: Vec<Option<f64>> = vec![Some(500.0); 6];
        values.push(None);
        values.push(Some(0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let outcome = imputer().impute(&keys, &values, &mut rng).unwrap();
        let counts = outcome.level_counts();

        assert_eq!(counts.get(&StratumLevel::PropertyDistrict), Some(&1));
        assert_eq!(counts.get(&StratumLevel::Global), Some(&1));
        assert_eq!(outcome.imputed[0].row, 6);
        assert_eq!(outcome.imputed[1].row, 7);
    }
}
