//! Trend models for ClimTrend
//!
//! Fits a linear trend to an extracted annual series twice: once by
//! ordinary least squares, and once by generalized least squares under
//! an AR(1) error covariance parameterized by the lag-1 autocorrelation
//! of the OLS residuals. Both fits carry t-based inference on the slope.

pub mod acf;
pub mod covariance;
pub mod lm;
pub mod summary;

mod error;

// Re-exports
pub use error::{ModelError, Result};
pub use lm::result::{Coefficient, FitMethod, TrendFit};
pub use summary::TrendComparison;
