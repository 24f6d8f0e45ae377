//! Extracted annual series
//!
//! One observation per year, for a fixed grid cell and calendar month.
//! The series is the sole input to the trend estimators downstream.

use ndarray::Array1;
use serde::Serialize;

use crate::error::{DataError, Result};

/// Ordered (year, value) series for one location and calendar month
///
/// Invariant: years are strictly increasing — sorted on construction,
/// duplicates rejected.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedSeries {
    years: Vec<i32>,
    values: Vec<f64>,
}

impl ExtractedSeries {
    /// Build a series from (year, value) pairs
    ///
    /// Pairs are sorted by year; a duplicate year is a
    /// `DataError::DuplicateYear`.
    pub fn new(mut pairs: Vec<(i32, f64)>) -> Result<Self> {
        pairs.sort_by_key(|&(year, _)| year);

        for window in pairs.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(DataError::DuplicateYear(window[0].0));
            }
        }

        let (years, values) = pairs.into_iter().unzip();
        Ok(Self { years, values })
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Whether the series holds no observations
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Observation years, strictly increasing
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Observed values, aligned to `years`
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values as a response vector
    pub fn values_array(&self) -> Array1<f64> {
        Array1::from_vec(self.values.clone())
    }

    /// Zero-based time index: year minus the first year
    ///
    /// This is the single regressor for the trend fits.
    pub fn time_index(&self) -> Array1<f64> {
        let origin = self.years.first().copied().unwrap_or(0);
        self.years.iter().map(|&y| (y - origin) as f64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sorts_pairs_by_year() {
        let series =
            ExtractedSeries::new(vec![(1992, 301.0), (1990, 300.0), (1991, 300.5)]).unwrap();
        assert_eq!(series.years(), &[1990, 1991, 1992]);
        assert_eq!(series.values(), &[300.0, 300.5, 301.0]);
    }

    #[test]
    fn rejects_duplicate_years() {
        let err = ExtractedSeries::new(vec![(1990, 300.0), (1990, 301.0)]).unwrap_err();
        assert!(matches!(err, DataError::DuplicateYear(1990)));
    }

    #[test]
    fn time_index_is_zero_based() {
        let series =
            ExtractedSeries::new(vec![(1990, 300.0), (1993, 301.5), (1991, 300.5)]).unwrap();
        let t = series.time_index();
        assert_abs_diff_eq!(t[0], 0.0);
        assert_abs_diff_eq!(t[1], 1.0);
        assert_abs_diff_eq!(t[2], 3.0);
    }

    #[test]
    fn empty_series_is_allowed_at_type_level() {
        let series = ExtractedSeries::new(Vec::new()).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.time_index().len(), 0);
    }
}
