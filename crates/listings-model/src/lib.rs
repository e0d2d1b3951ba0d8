//! Data model shared by the listings cleaning crates.
//!
//! - **columns**: column names of the listings dataset
//! - **enums**: district taxonomy, stratum levels, host response times
//! - **options**: typed configuration for every pipeline stage
//! - **error**: option validation errors

pub mod columns;
pub mod enums;
pub mod error;
pub mod options;

pub use enums::{District, HostResponseTime, StratumLevel};
pub use error::{OptionsError, Result};
pub use options::{CleaningOptions, ImputationOptions, SampleSpec};
