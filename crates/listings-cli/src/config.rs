//! Layered cleaning configuration.
//!
//! Precedence, lowest first: built-in defaults, the `--config` TOML file,
//! explicit command-line flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use listings_model::{CleaningOptions, SampleSpec};

/// Reads options from a TOML file, or returns the defaults.
///
/// Keys left out of the file keep their default values.
pub fn load_options(path: Option<&Path>) -> Result<CleaningOptions> {
    let Some(path) = path else {
        return Ok(CleaningOptions::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: CleaningOptions =
        toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
    Ok(options)
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningOverrides {
    pub sample: Option<SampleSpec>,
    pub sample_seed: Option<u64>,
    pub seed: Option<u64>,
    pub min_support: Option<usize>,
    pub std_floor: Option<f64>,
    pub min_value: Option<f64>,
    pub write_indicator_free_copy: Option<bool>,
}

impl CleaningOverrides {
    /// Replaces every field of `options` that was given explicitly.
    pub fn apply(&self, mut options: CleaningOptions) -> CleaningOptions {
        if let Some(sample) = self.sample {
            options.sample = sample;
        }
        if let Some(seed) = self.sample_seed {
            options.sample_seed = seed;
        }
        if let Some(seed) = self.seed {
            options.imputation.seed = seed;
        }
        if let Some(min_support) = self.min_support {
            options.imputation.min_support = min_support;
        }
        if let Some(std_floor) = self.std_floor {
            options.imputation.std_floor = std_floor;
        }
        if let Some(min_value) = self.min_value {
            options.imputation.min_value = min_value;
        }
        if let Some(write) = self.write_indicator_free_copy {
            options.write_indicator_free_copy = write;
        }
        options
    }
}

/// Loads, overrides, and validates the options for one run.
pub fn resolve_options(
    path: Option<&Path>,
    overrides: &CleaningOverrides,
) -> Result<CleaningOptions> {
    let options = overrides.apply(load_options(path)?);
    options.validate().context("invalid cleaning options")?;
    Ok(options)
}
