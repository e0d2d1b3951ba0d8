//! Stratum selection.

use listings_model::StratumLevel;

use super::stats::{ListingKeys, StratumKey, StratumStats, StratumTables};

/// Looks up the stratum `keys` falls under at `level`.
///
/// `None` when no observed record shares the key.
pub fn lookup_level(
    level: StratumLevel,
    keys: &ListingKeys,
    tables: &StratumTables,
) -> Option<StratumStats> {
    tables.get(&StratumKey::for_level(level, keys)).copied()
}

/// The stratum chosen for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub level: StratumLevel,
    pub stats: StratumStats,
}

/// Ordered strata to try before falling back to the global one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    levels: Vec<StratumLevel>,
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new([
            StratumLevel::PropertyDistrict,
            StratumLevel::PropertyType,
            StratumLevel::District,
        ])
    }
}

impl FallbackChain {
    /// A chain trying `levels` in order. The global level is always the
    /// terminal step and is ignored if listed.
    pub fn new(levels: impl IntoIterator<Item = StratumLevel>) -> Self {
        Self {
            levels: levels
                .into_iter()
                .filter(|level| *level != StratumLevel::Global)
                .collect(),
        }
    }

    pub fn levels(&self) -> &[StratumLevel] {
        &self.levels
    }

    /// First level whose stratum exists with at least `min_support` records,
    /// else the global stratum regardless of its support.
    pub fn resolve(
        &self,
        keys: &ListingKeys,
        tables: &StratumTables,
        min_support: usize,
    ) -> Resolution {
        self.levels
            .iter()
            .find_map(|&level| {
                lookup_level(level, keys, tables)
                    .filter(|stats| stats.is_supported(min_support))
                    .map(|stats| Resolution { level, stats })
            })
            .unwrap_or_else(|| Resolution {
                level: StratumLevel::Global,
                stats: *tables.global(),
            })
    }
}
