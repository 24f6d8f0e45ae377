//! Trend comparison summary

use std::fmt;

use serde::Serialize;

use crate::lm::{Coefficient, TrendFit};

/// Side-by-side OLS vs GLS trend comparison
///
/// The textual report of the analysis: both slope estimates with their
/// p-values plus the estimated autocorrelation, all to 4 decimal places.
#[derive(Debug, Clone, Serialize)]
pub struct TrendComparison {
    /// OLS slope coefficient
    pub ols_slope: Coefficient,
    /// GLS/AR(1) slope coefficient
    pub gls_slope: Coefficient,
    /// Estimated lag-1 autocorrelation of the OLS residuals
    pub rho: f64,
    /// Number of observations both fits were run on
    pub n_obs: usize,
}

impl TrendComparison {
    /// Assemble the comparison from both fits and the estimated ρ
    pub fn new(ols: &TrendFit, gls: &TrendFit, rho: f64) -> Self {
        Self {
            ols_slope: ols.slope.clone(),
            gls_slope: gls.slope.clone(),
            rho,
            n_obs: ols.df_residual + 2,
        }
    }
}

impl fmt::Display for TrendComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- TREND ANALYSIS RESULTS ---")?;
        writeln!(
            f,
            "1. OLS Trend (ignores autocorrelation): {:.4} K/yr",
            self.ols_slope.estimate
        )?;
        writeln!(f, "   p-value: {:.4}", self.ols_slope.p_value)?;
        writeln!(
            f,
            "2. GLS-AR(1) Trend (accounts for autocorrelation): {:.4} K/yr",
            self.gls_slope.estimate
        )?;
        writeln!(f, "   p-value: {:.4}", self.gls_slope.p_value)?;
        write!(f, "Estimated autocorrelation (rho): {:.4}", self.rho)
    }
}
