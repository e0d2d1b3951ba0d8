//! Cleaning run with explicit stages.
//!
//! The run follows these stages in order:
//! 1. **Ingest**: read the CSV export, sample rows, keep the selected columns
//! 2. **Clean**: features, price, districts, imputation, unit conversion
//! 3. **Output**: write the cleaned CSVs
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use listings_ingest::{read_listings_csv, sample_rows, select_columns, write_listings_csv};
use listings_model::CleaningOptions;
use listings_model::columns::SQUARE_METERS_IMPUTED;
use listings_transform::{CleaningPipeline, CleaningReport};

/// Output file that keeps the provenance column.
pub const INDICATOR_FILE: &str = "listings_clean_with_indicator.csv";
/// Output file without the provenance column.
pub const PLAIN_FILE: &str = "listings_clean.csv";

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Result of the ingest stage.
#[derive(Debug)]
pub struct IngestResult {
    /// Rows in the export before sampling.
    pub raw_rows: usize,
    /// Sampled rows restricted to the selected columns.
    pub frame: DataFrame,
}

/// Read the export and reduce it to the configured rows and columns.
pub fn ingest(input: &Path, options: &CleaningOptions) -> Result<IngestResult> {
    let raw = read_listings_csv(input).with_context(|| format!("read {}", input.display()))?;
    let raw_rows = raw.height();
    let sampled = sample_rows(&raw, options.sample, options.sample_seed).context("sample rows")?;
    let frame = select_columns(&sampled, &options.columns).context("select columns")?;
    debug!(
        raw_rows,
        sampled_rows = frame.height(),
        columns = frame.width(),
        "prepared listings"
    );
    Ok(IngestResult { raw_rows, frame })
}

// ============================================================================
// Stage 2: Clean
// ============================================================================

/// Run every transformation over the prepared frame.
pub fn clean(frame: DataFrame, options: &CleaningOptions) -> Result<(DataFrame, CleaningReport)> {
    let pipeline = CleaningPipeline::new(options.clone()).context("configure cleaning")?;
    pipeline.run(frame).context("clean listings")
}

// ============================================================================
// Stage 3: Output
// ============================================================================

/// Output stage settings.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig<'a> {
    pub output_dir: &'a Path,
    /// Report the paths without writing anything.
    pub dry_run: bool,
    /// Also write the copy without the provenance column.
    pub write_plain_copy: bool,
}

/// Files produced (or, for a dry run, that would be produced).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputPaths {
    pub with_indicator: Option<PathBuf>,
    pub plain: Option<PathBuf>,
}

/// Write the cleaned frame, and optionally the copy without provenance.
pub fn output(df: &mut DataFrame, config: &OutputConfig<'_>) -> Result<OutputPaths> {
    let with_indicator = config.output_dir.join(INDICATOR_FILE);
    let plain = config
        .write_plain_copy
        .then(|| config.output_dir.join(PLAIN_FILE));

    if config.dry_run {
        info!(output_dir = %config.output_dir.display(), "dry run: no files written");
        return Ok(OutputPaths {
            with_indicator: Some(with_indicator),
            plain,
        });
    }

    write_listings_csv(df, &with_indicator)
        .with_context(|| format!("write {}", with_indicator.display()))?;
    if let Some(path) = &plain {
        let mut without_flag = df
            .drop(SQUARE_METERS_IMPUTED)
            .context("drop provenance column")?;
        write_listings_csv(&mut without_flag, path)
            .with_context(|| format!("write {}", path.display()))?;
    }

    Ok(OutputPaths {
        with_indicator: Some(with_indicator),
        plain,
    })
}
