//! Configuration options for listings cleaning.
//!
//! Every field has a default so a partial TOML file only needs the values it
//! changes.

use serde::{Deserialize, Serialize};

use crate::columns::{DEFAULT_COLUMNS, REQUIRED_COLUMNS};
use crate::error::{OptionsError, Result};

/// How many rows of the raw export to keep before cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSpec {
    /// Keep every row in file order.
    All,
    /// Keep `fraction * rows` rows (ties to even), drawn without replacement.
    Fraction(f64),
    /// Keep at most this many rows, drawn without replacement.
    Rows(usize),
}

impl Default for SampleSpec {
    fn default() -> Self {
        SampleSpec::Fraction(0.25)
    }
}

impl SampleSpec {
    /// Number of rows to draw from a frame of `height` rows.
    pub fn target_rows(&self, height: usize) -> usize {
        match *self {
            SampleSpec::All => height,
            SampleSpec::Fraction(fraction) => {
                ((height as f64 * fraction).round_ties_even() as usize).min(height)
            }
            SampleSpec::Rows(rows) => rows.min(height),
        }
    }
}

/// Options for the hierarchical floor-area imputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationOptions {
    /// Minimum number of observed records for a stratum to be selected.
    ///
    /// Shared by every level except global, which is used unconditionally.
    pub min_support: usize,
    /// Lower bound for every stratum's standard deviation (square feet).
    pub std_floor: f64,
    /// Lower bound for every imputed value (square feet).
    pub min_value: f64,
    /// Seed for the generator that draws imputed values.
    pub seed: u64,
}

impl Default for ImputationOptions {
    fn default() -> Self {
        Self {
            min_support: 5,
            std_floor: 10.0,
            min_value: 10.0,
            seed: 42,
        }
    }
}

impl ImputationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_support(mut self, min_support: usize) -> Self {
        self.min_support = min_support;
        self
    }

    pub fn with_std_floor(mut self, std_floor: f64) -> Self {
        self.std_floor = std_floor;
        self
    }

    pub fn with_min_value(mut self, min_value: f64) -> Self {
        self.min_value = min_value;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_support == 0 {
            return Err(OptionsError::MinSupport);
        }
        if !(self.std_floor.is_finite() && self.std_floor > 0.0) {
            return Err(OptionsError::StdFloor(self.std_floor));
        }
        if !(self.min_value.is_finite() && self.min_value >= 0.0) {
            return Err(OptionsError::MinValue(self.min_value));
        }
        Ok(())
    }
}

/// Options controlling the whole cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Row reduction applied right after loading.
    pub sample: SampleSpec,
    /// Seed for row sampling (independent of the imputation seed).
    pub sample_seed: u64,
    /// Columns kept from the raw export.
    pub columns: Vec<String>,
    /// An amenity is premium when it appears in at most this share of listings.
    pub premium_amenity_ratio: f64,
    /// Square feet to square metres.
    pub sqft_to_sqm: f64,
    /// Also write a copy of the output without the provenance column.
    pub write_indicator_free_copy: bool,
    pub imputation: ImputationOptions,
}

impl Default for CleaningOptions {
    fn default() -> Self {
        Self {
            sample: SampleSpec::default(),
            sample_seed: 42,
            columns: DEFAULT_COLUMNS.iter().map(|name| (*name).to_string()).collect(),
            premium_amenity_ratio: 0.10,
            sqft_to_sqm: 0.092903,
            write_indicator_free_copy: true,
            imputation: ImputationOptions::default(),
        }
    }
}

impl CleaningOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample(mut self, sample: SampleSpec) -> Self {
        self.sample = sample;
        self
    }

    pub fn with_imputation(mut self, imputation: ImputationOptions) -> Self {
        self.imputation = imputation;
        self
    }

    /// Check every value before any data is touched.
    pub fn validate(&self) -> Result<()> {
        match self.sample {
            SampleSpec::Fraction(fraction) if !(fraction > 0.0 && fraction <= 1.0) => {
                return Err(OptionsError::SampleFraction(fraction));
            }
            SampleSpec::Rows(0) => return Err(OptionsError::SampleRows),
            _ => {}
        }
        if self.columns.is_empty() {
            return Err(OptionsError::NoColumns);
        }
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !self.columns.iter().any(|name| name.as_str() == **required))
        {
            return Err(OptionsError::RequiredColumn((*missing).to_string()));
        }
        if !(self.premium_amenity_ratio >= 0.0 && self.premium_amenity_ratio <= 1.0) {
            return Err(OptionsError::PremiumRatio(self.premium_amenity_ratio));
        }
        if !(self.sqft_to_sqm.is_finite() && self.sqft_to_sqm > 0.0) {
            return Err(OptionsError::ConversionFactor(self.sqft_to_sqm));
        }
        self.imputation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_rounds_to_nearest_row() {
        assert_eq!(SampleSpec::Fraction(0.25).target_rows(10), 2);
        assert_eq!(SampleSpec::Fraction(0.25).target_rows(12), 3);
        assert_eq!(SampleSpec::Fraction(0.25).target_rows(14), 4);
        assert_eq!(SampleSpec::Fraction(1.0).target_rows(7), 7);
        assert_eq!(SampleSpec::Rows(5000).target_rows(12), 12);
        assert_eq!(SampleSpec::All.target_rows(12), 12);
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(CleaningOptions::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let options = CleaningOptions::default().with_sample(SampleSpec::Fraction(1.5));
        assert_eq!(options.validate(), Err(OptionsError::SampleFraction(1.5)));

        let options = CleaningOptions::default()
            .with_imputation(ImputationOptions::default().with_min_support(0));
        assert_eq!(options.validate(), Err(OptionsError::MinSupport));

        let options = CleaningOptions::default()
            .with_imputation(ImputationOptions::default().with_std_floor(f64::NAN));
        assert!(matches!(options.validate(), Err(OptionsError::StdFloor(_))));

        let mut options = CleaningOptions::default();
        options.columns.retain(|name| name != "square_feet");
        assert_eq!(
            options.validate(),
            Err(OptionsError::RequiredColumn("square_feet".to_string()))
        );
    }
}
