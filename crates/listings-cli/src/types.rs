use std::path::PathBuf;

use listings_cli::pipeline::OutputPaths;
use listings_transform::CleaningReport;

#[derive(Debug)]
pub struct CleanResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub raw_rows: usize,
    pub sampled_rows: usize,
    pub report: CleaningReport,
    pub outputs: OutputPaths,
    pub dry_run: bool,
}
