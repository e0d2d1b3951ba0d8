//! Listings data transformation.
//!
//! This crate provides the transformation stages of the cleaning pipeline:
//!
//! - **normalization**: neighbourhood → district mapping and price cleaning
//! - **features**: amenity counts and the host professionalism score
//! - **imputation**: missing-value detection, stratified statistics, and
//!   hierarchical floor-area imputation
//! - **units**: square feet → square metres with the provenance flag
//! - **summary**: distribution summaries for reporting

pub mod error;
pub mod features;
pub mod imputation;
pub mod normalization;
pub mod pipeline;
pub mod summary;
pub mod units;

pub use error::{Result, TransformError};
pub use imputation::{
    FallbackChain, HierarchicalImputer, ImputationColumns, ImputationOutcome, ImputationReport,
    ListingKeys, MissingMask, StratumKey, StratumStats, StratumTables, impute_floor_area,
};
pub use pipeline::{CleaningPipeline, CleaningReport};
pub use summary::DistributionSummary;
pub use units::{AreaConversion, AreaSummary};
