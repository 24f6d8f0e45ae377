//! Analysis configuration
//!
//! The original workflow baked the dataset path, variable name, target
//! coordinate and time window into script constants. Here they form an
//! explicit configuration structure, validated once at startup before
//! any file is touched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// Parameters for one trend analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Path to the NetCDF dataset
    pub path: PathBuf,
    /// Name of the scalar variable to analyse
    pub variable: String,
    /// Target latitude in degrees north
    pub latitude: f64,
    /// Target longitude in degrees east
    pub longitude: f64,
    /// Calendar month to extract (1-12)
    pub month: u32,
    /// First year of the analysis window (inclusive)
    pub start_year: i32,
    /// Last year of the analysis window (inclusive)
    pub end_year: i32,
}

impl AnalysisConfig {
    /// Validate the configuration
    ///
    /// Checked once before the pipeline runs; any violation aborts with
    /// `DataError::InvalidConfig`.
    pub fn validate(&self) -> Result<()> {
        if self.variable.is_empty() {
            return Err(DataError::InvalidConfig(
                "variable name must not be empty".to_string(),
            ));
        }

        if !(1..=12).contains(&self.month) {
            return Err(DataError::InvalidConfig(format!(
                "month must be in 1..=12, got {}",
                self.month
            )));
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(DataError::InvalidConfig(format!(
                "latitude must be in [-90, 90], got {}",
                self.latitude
            )));
        }

        if !(-360.0..=360.0).contains(&self.longitude) {
            return Err(DataError::InvalidConfig(format!(
                "longitude must be in [-360, 360], got {}",
                self.longitude
            )));
        }

        if self.start_year > self.end_year {
            return Err(DataError::InvalidConfig(format!(
                "start year {} is after end year {}",
                self.start_year, self.end_year
            )));
        }

        Ok(())
    }
}
