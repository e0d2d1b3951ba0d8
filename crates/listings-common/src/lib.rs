//! Shared utilities for the listings cleaning crates.
//!
//! This crate provides common utilities used across the workspace,
//! including Polars DataFrame helpers and numeric parsing.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use self::polars::{
    any_to_f64, any_to_string_opt, column_f64_values, column_string_values,
    format_numeric, parse_f64, round_half_even,
};
