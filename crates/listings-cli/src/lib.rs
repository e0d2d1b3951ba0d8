//! CLI library components for the listings cleaner.

pub mod config;
pub mod logging;
pub mod pipeline;
