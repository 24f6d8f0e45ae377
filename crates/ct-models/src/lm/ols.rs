//! Ordinary Least Squares trend estimator
//!
//! The baseline fit: value ~ 1 + time_index under independent,
//! homoscedastic Gaussian errors. Deliberately ignores autocorrelation;
//! the GLS estimator exists precisely to show how inference changes
//! when it is accounted for.

use log::info;

use ct_core::ExtractedSeries;

use crate::error::Result;
use crate::lm::{self, FitMethod, TrendFit};

/// Fit the OLS trend to an extracted series
///
/// Requires at least 3 observations (n > 2 parameters). Inference uses
/// the standard formulas: se from σ²(X'X)⁻¹, t = estimate / se,
/// two-sided p-value from Student's t with n − 2 degrees of freedom.
pub fn fit(series: &ExtractedSeries) -> Result<TrendFit> {
    lm::check_sample_size(series.len())?;

    let x = lm::design_matrix(series);
    let y = series.values_array();

    let coefficients = lm::svd_solve(&x, &y, "ols_fit")?;

    let residuals = &y - &x.dot(&coefficients);
    let rss = residuals.mapv(|r| r * r).sum();
    let gram = x.t().dot(&x);

    let fit = lm::assemble_fit(FitMethod::Ols, &x, &y, coefficients, &gram, rss, "ols_fit")?;
    info!(
        "OLS fit over {} observations: slope {:.6}, p = {:.4}",
        series.len(),
        fit.slope(),
        fit.slope_p_value()
    );

    Ok(fit)
}
