//! Stratified floor-area statistics.
//!
//! Observed values are grouped three ways (property type and district
//! together, property type alone, district alone) plus one global group.
//! Each group is summarized as mean, floored sample standard deviation, and
//! support.

use std::collections::BTreeMap;
use std::fmt;

use listings_model::StratumLevel;

use super::detector::MissingMask;
use crate::error::{Result, TransformError};

/// Grouping attributes of one listing. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListingKeys {
    pub property_type: Option<String>,
    pub district: Option<String>,
}

impl ListingKeys {
    pub fn new(property_type: Option<&str>, district: Option<&str>) -> Self {
        Self {
            property_type: property_type.map(str::to_string),
            district: district.map(str::to_string),
        }
    }
}

/// Identifies one stratum. An absent component is a key of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StratumKey {
    PropertyDistrict {
        property_type: Option<String>,
        district: Option<String>,
    },
    PropertyType(Option<String>),
    District(Option<String>),
    Global,
}

impl StratumKey {
    /// The key `keys` falls under at `level`.
    pub fn for_level(level: StratumLevel, keys: &ListingKeys) -> Self {
        match level {
            StratumLevel::PropertyDistrict => StratumKey::PropertyDistrict {
                property_type: keys.property_type.clone(),
                district: keys.district.clone(),
            },
            StratumLevel::PropertyType => StratumKey::PropertyType(keys.property_type.clone()),
            StratumLevel::District => StratumKey::District(keys.district.clone()),
            StratumLevel::Global => StratumKey::Global,
        }
    }

    pub fn level(&self) -> StratumLevel {
        match self {
            StratumKey::PropertyDistrict { .. } => StratumLevel::PropertyDistrict,
            StratumKey::PropertyType(_) => StratumLevel::PropertyType,
            StratumKey::District(_) => StratumLevel::District,
            StratumKey::Global => StratumLevel::Global,
        }
    }
}

fn part(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("<null>")
}

impl fmt::Display for StratumKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StratumKey::PropertyDistrict {
                property_type,
                district,
            } => write!(f, "({}, {})", part(property_type), part(district)),
            StratumKey::PropertyType(value) | StratumKey::District(value) => {
                write!(f, "({})", part(value))
            }
            StratumKey::Global => write!(f, "(global)"),
        }
    }
}

/// Summary of one stratum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StratumStats {
    pub mean: f64,
    /// Sample standard deviation, never below the configured floor.
    pub std: f64,
    /// Number of observed records in the stratum.
    pub support: usize,
}

impl StratumStats {
    /// Summarizes `values`, sorting them first so the result does not depend
    /// on input order. Returns `None` for an empty group.
    ///
    /// Groups with fewer than two values, or whose spread is at or below
    /// `std_floor`, get exactly `std_floor`.
    pub fn from_values(values: &mut [f64], std_floor: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n < 2 {
            std_floor
        } else {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            let sample_std = (squares / (n - 1) as f64).sqrt();
            if sample_std > std_floor {
                sample_std
            } else {
                std_floor
            }
        };

        Some(Self {
            mean,
            std,
            support: n,
        })
    }

    pub fn is_supported(&self, min_support: usize) -> bool {
        self.support >= min_support
    }
}

/// Per-level group counts, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCoverage {
    pub level: StratumLevel,
    pub groups: usize,
    pub supported_groups: usize,
}

/// Finalized statistics for every stratum.
///
/// Only [`StratumTablesBuilder::build`] creates tables, so anything holding
/// a `StratumTables` sees every observation already accounted for.
#[derive(Debug, Clone, PartialEq)]
pub struct StratumTables {
    strata: BTreeMap<StratumKey, StratumStats>,
    global: StratumStats,
}

impl StratumTables {
    /// Builds tables from the records `mask` marks as observed.
    pub fn from_records(
        keys: &[ListingKeys],
        values: &[Option<f64>],
        mask: &MissingMask,
        std_floor: f64,
    ) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(TransformError::LengthMismatch {
                expected: values.len(),
                actual: keys.len(),
            });
        }
        if mask.len() != values.len() {
            return Err(TransformError::LengthMismatch {
                expected: values.len(),
                actual: mask.len(),
            });
        }

        let mut builder = StratumTablesBuilder::new(std_floor);
        for (row, (record, value)) in keys.iter().zip(values).enumerate() {
            if mask.is_missing(row) {
                continue;
            }
            if let Some(value) = value {
                builder.observe(record, *value);
            }
        }
        builder.build()
    }

    /// Statistics stored under `key`. The global key always resolves.
    pub fn get(&self, key: &StratumKey) -> Option<&StratumStats> {
        match key {
            StratumKey::Global => Some(&self.global),
            other => self.strata.get(other),
        }
    }

    pub fn global(&self) -> &StratumStats {
        &self.global
    }

    /// Strata at one level, in key order.
    pub fn level(&self, level: StratumLevel) -> impl Iterator<Item = (&StratumKey, &StratumStats)> {
        self.strata.iter().filter(move |(key, _)| key.level() == level)
    }

    /// Group counts per level, most specific first.
    pub fn coverage(&self, min_support: usize) -> Vec<LevelCoverage> {
        StratumLevel::FALLBACK_ORDER
            .iter()
            .map(|&level| {
                let (groups, supported_groups) = if level == StratumLevel::Global {
                    (1, 1)
                } else {
                    self.level(level).fold((0, 0), |(groups, supported), (_, stats)| {
                        (
                            groups + 1,
                            supported + usize::from(stats.is_supported(min_support)),
                        )
                    })
                };
                LevelCoverage {
                    level,
                    groups,
                    supported_groups,
                }
            })
            .collect()
    }
}

/// Accumulates observations before they are summarized.
#[derive(Debug, Clone)]
pub struct StratumTablesBuilder {
    std_floor: f64,
    groups: BTreeMap<StratumKey, Vec<f64>>,
    global: Vec<f64>,
}

impl StratumTablesBuilder {
    pub fn new(std_floor: f64) -> Self {
        Self {
            std_floor,
            groups: BTreeMap::new(),
            global: Vec::new(),
        }
    }

    pub fn observe(&mut self, keys: &ListingKeys, value: f64) {
        for level in [
            StratumLevel::PropertyDistrict,
            StratumLevel::PropertyType,
            StratumLevel::District,
        ] {
            self.groups
                .entry(StratumKey::for_level(level, keys))
                .or_default()
                .push(value);
        }
        self.global.push(value);
    }

    /// Summarizes every group. Fails when nothing was observed.
    pub fn build(self) -> Result<StratumTables> {
        let Self {
            std_floor,
            groups,
            mut global,
        } = self;

        let global =
            StratumStats::from_values(&mut global, std_floor).ok_or(TransformError::NoReferenceData)?;
        let strata = groups
            .into_iter()
            .filter_map(|(key, mut values)| {
                StratumStats::from_values(&mut values, std_floor).map(|stats| (key, stats))
            })
            .collect();

        Ok(StratumTables { strata, global })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(property_type: &str, district: &str) -> ListingKeys {
        ListingKeys::new(Some(property_type), Some(district))
    }

    #[test]
    fn test_sample_std_with_floor() {
        let stats = StratumStats::from_values(&mut [500.0, 520.0, 480.0, 510.0], 10.0).unwrap();
        assert_eq!(stats.support, 4);
        assert!((stats.mean - 502.5).abs() < 1e-9);
        // Sum of squared deviations is 875, over n - 1 = 3.
        assert!((stats.std - (875.0f64 / 3.0).sqrt()).abs() < 1e-9);

        let tight = StratumStats::from_values(&mut [100.0, 101.0, 102.0], 10.0).unwrap();
        assert_eq!(tight.std, 10.0);
    }

    #[test]
    fn test_single_point_gets_floor() {
        let stats = StratumStats::from_values(&mut [750.0], 10.0).unwrap();
        assert_eq!(stats.std, 10.0);
        assert_eq!(stats.mean, 750.0);
        assert!(StratumStats::from_values(&mut [], 10.0).is_none());
    }

    #[test]
    fn test_null_components_are_keys() {
        let records = vec![
            ListingKeys::new(None, Some("Gràcia")),
            ListingKeys::new(None, Some("Gràcia")),
            keys("Loft", "Gràcia"),
        ];
        let values = vec![Some(400.0), Some(600.0), Some(900.0)];
        let mask = MissingMask::detect(&values);
        let tables = StratumTables::from_records(&records, &values, &mask, 10.0).unwrap();

        let null_type = tables.get(&StratumKey::PropertyType(None)).unwrap();
        assert_eq!(null_type.support, 2);
        assert_eq!(null_type.mean, 500.0);

        let district = tables
            .get(&StratumKey::District(Some("Gràcia".to_string())))
            .unwrap();
        assert_eq!(district.support, 3);
        assert_eq!(tables.global().support, 3);
    }

    #[test]
    fn test_masked_records_are_excluded() {
        let records = vec![keys("Loft", "Gràcia"); 3];
        let values = vec![Some(400.0), Some(0.0), None];
        let mask = MissingMask::detect(&values);
        let tables = StratumTables::from_records(&records, &values, &mask, 10.0).unwrap();
        assert_eq!(tables.global().support, 1);
        assert_eq!(tables.global().mean, 400.0);
    }

    #[test]
    fn test_no_observations_is_fatal() {
        let records = vec![keys("Loft", "Gràcia"); 2];
        let values = vec![None, Some(0.0)];
        let mask = MissingMask::detect(&values);
        let err = StratumTables::from_records(&records, &values, &mask, 10.0).unwrap_err();
        assert!(matches!(err, TransformError::NoReferenceData));
    }

    #[test]
    fn test_coverage_counts_supported_groups() {
        let mut records = vec![keys("Apartment", "Eixample"); 5];
        records.push(keys("Loft", "Eixample"));
        let values: Vec<Option<f64>> = (0..6).map(|i| Some(500.0 + f64::from(i))).collect();
        let mask = MissingMask::detect(&values);
        let tables = StratumTables::from_records(&records, &values, &mask, 10.0).unwrap();

        let coverage = tables.coverage(5);
        assert_eq!(coverage[0].level, StratumLevel::PropertyDistrict);
        assert_eq!(coverage[0].groups, 2);
        assert_eq!(coverage[0].supported_groups, 1);
        assert_eq!(coverage[2].groups, 1);
        assert_eq!(coverage[2].supported_groups, 1);
        assert_eq!(coverage[3].level, StratumLevel::Global);
    }

    #[test]
    fn test_key_display() {
        let key = StratumKey::for_level(
            StratumLevel::PropertyDistrict,
            &ListingKeys::new(Some("Loft"), None),
        );
        assert_eq!(key.to_string(), "(Loft, <null>)");
        assert_eq!(key.level(), StratumLevel::PropertyDistrict);
    }
}
