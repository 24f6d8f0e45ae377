//! Core data access for ClimTrend
//!
//! This crate provides the data layer for the trend analysis pipeline:
//! loading a gridded, time-indexed scalar field from a NetCDF file,
//! decoding its CF time axis, selecting the grid cell nearest a target
//! coordinate, and filtering down to a single-month annual series.

pub mod config;
pub mod grid;
pub mod series;
pub mod time;

mod error;

// Re-exports
pub use config::AnalysisConfig;
pub use error::{DataError, Result};
pub use grid::GriddedSeries;
pub use series::ExtractedSeries;
pub use time::{Calendar, CfTime};
