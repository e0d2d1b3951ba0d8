//! CLI argument definitions for the listings cleaner.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "listings-clean",
    version,
    about = "Clean a rental listings export and impute missing floor areas",
    long_about = "Clean a rental listings CSV export.\n\n\
                  Derives amenity and professionalism features, maps neighbourhoods to\n\
                  districts, imputes missing floor areas from stratified statistics,\n\
                  and writes the result in square metres."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw text values (neighbourhood names) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a listings CSV export.
    Clean(CleanArgs),

    /// Print the neighbourhood to district table.
    Districts,
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Path to the listings CSV export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for the cleaned files (default: the input's directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with cleaning options.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub sample: SampleArgs,

    /// Seed for row sampling.
    #[arg(long = "sample-seed", value_name = "SEED")]
    pub sample_seed: Option<u64>,

    /// Seed for the imputation draws.
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Minimum observed records for a stratum to be used.
    #[arg(long = "min-support", value_name = "N")]
    pub min_support: Option<usize>,

    /// Lower bound for stratum standard deviations (square feet).
    #[arg(long = "std-floor", value_name = "SQFT")]
    pub std_floor: Option<f64>,

    /// Lower bound for imputed values (square feet).
    #[arg(long = "min-value", value_name = "SQFT")]
    pub min_value: Option<f64>,

    /// Skip the copy without the imputation indicator column.
    #[arg(long = "no-plain-copy")]
    pub no_plain_copy: bool,

    /// Run every stage and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Row sampling flags; at most one may be given.
#[derive(Args)]
#[group(multiple = false)]
pub struct SampleArgs {
    /// Keep this fraction of rows, in (0, 1].
    #[arg(long = "sample-fraction", value_name = "F")]
    pub sample_fraction: Option<f64>,

    /// Keep at most this many rows.
    #[arg(long = "sample-rows", value_name = "N")]
    pub sample_rows: Option<usize>,

    /// Keep every row in file order.
    #[arg(long = "no-sample")]
    pub no_sample: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
