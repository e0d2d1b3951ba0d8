//! Listings data ingestion utilities.
//!
//! This crate loads the raw listings export into a Polars DataFrame and
//! writes cleaned frames back out.
//!
//! # Features
//!
//! - **CSV Loading**: every column is read as text; stages coerce what they need
//! - **Sampling**: seeded row reduction without replacement
//! - **Column Selection**: keep the configured subset, failing on absent columns
//! - **CSV Output**: write cleaned frames, creating parent directories
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use listings_ingest::{read_listings_csv, sample_rows, select_columns};
//! use listings_model::CleaningOptions;
//!
//! let options = CleaningOptions::default();
//! let raw = read_listings_csv(Path::new("barcelona_listings.csv"))?;
//! let sampled = sample_rows(&raw, options.sample, options.sample_seed)?;
//! let reduced = select_columns(&sampled, &options.columns)?;
//! ```

mod csv;
mod error;
mod sampling;
mod selection;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading and Writing ===
pub use csv::{MAX_CSV_FILE_SIZE, check_file_size, read_listings_csv, write_listings_csv};

// === Row and Column Reduction ===
pub use sampling::sample_rows;
pub use selection::select_columns;
