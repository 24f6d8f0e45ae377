//! Linear trend models
//!
//! Both estimators fit value ~ 1 + time_index over an extracted annual
//! series:
//! - Ordinary Least Squares (OLS) — the deliberately naive baseline,
//!   assuming independent errors.
//! - Generalized Least Squares under AR(1) errors (GLS) — the same
//!   design refit through the whitened normal equations of the AR(1)
//!   covariance.
//!
//! Shared solve and inference machinery lives here; the estimators are
//! thin front-ends over it.

pub mod gls;
pub mod ols;
pub mod result;

#[cfg(test)]
mod tests;

// Re-exports
pub use result::{Coefficient, FitMethod, TrendFit};

use ndarray::{Array1, Array2};
use ndarray_linalg::{Inverse, LeastSquaresSvd};
use statrs::distribution::{ContinuousCDF, StudentsT};

use ct_core::ExtractedSeries;

use crate::error::{ModelError, Result};

/// Matrix type alias for 2D arrays
pub type Matrix = Array2<f64>;
/// Vector type alias for 1D arrays
pub type Vector = Array1<f64>;

/// Number of regression parameters: intercept and slope
pub(crate) const N_PARAMS: usize = 2;

/// Floor applied to standard errors, guarding the degenerate
/// zero-residual fit (perfect line) against division by zero.
const SE_FLOOR: f64 = 1e-10;

/// Build the design matrix [1, time_index]
pub(crate) fn design_matrix(series: &ExtractedSeries) -> Matrix {
    let t = series.time_index();
    let mut x = Matrix::ones((t.len(), N_PARAMS));
    x.column_mut(1).assign(&t);
    x
}

/// Require more observations than parameters
pub(crate) fn check_sample_size(n: usize) -> Result<()> {
    if n <= N_PARAMS {
        return Err(ModelError::InsufficientData {
            n_samples: n,
            required: N_PARAMS + 1,
        });
    }
    Ok(())
}

/// Solve using SVD-based least squares (numerically stable)
pub(crate) fn svd_solve(x: &Matrix, y: &Vector, operation: &str) -> Result<Vector> {
    x.least_squares(y)
        .map(|ls| ls.solution)
        .map_err(|e| ModelError::NumericalError {
            message: format!("SVD least squares failed: {e}"),
            operation: operation.to_string(),
        })
}

/// Assemble a `TrendFit` from a solved system
///
/// Fitted values and residuals are always reported on the original
/// scale of `x`/`y`; inference (standard errors, t, p) runs on
/// `gram`/`rss_infer` — the X'X matrix and residual sum of squares of
/// the system actually solved, which for GLS is the whitened one.
pub(crate) fn assemble_fit(
    method: FitMethod,
    x: &Matrix,
    y: &Vector,
    coefficients: Vector,
    gram: &Matrix,
    rss_infer: f64,
    operation: &str,
) -> Result<TrendFit> {
    let n = y.len();
    let df_residual = n - N_PARAMS;

    let fitted_values = x.dot(&coefficients);
    let residuals = y - &fitted_values;

    let std_errors = standard_errors(gram, rss_infer, df_residual, operation)?;
    let (t_statistics, p_values) =
        t_inference(&coefficients, &std_errors, df_residual, operation)?;

    let rss = residuals.mapv(|r| r * r).sum();
    let y_mean = y.sum() / n as f64;
    let tss = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum::<f64>();
    let r_squared = if tss > f64::EPSILON { 1.0 - rss / tss } else { 0.0 };

    let named = |idx: usize, name: &str| Coefficient {
        name: name.to_string(),
        estimate: coefficients[idx],
        std_error: std_errors[idx],
        t_stat: t_statistics[idx],
        p_value: p_values[idx],
    };

    Ok(TrendFit {
        method,
        intercept: named(0, "(Intercept)"),
        slope: named(1, "time_index"),
        fitted_values,
        residuals,
        r_squared,
        residual_std_error: (rss_infer / df_residual as f64).sqrt(),
        df_residual,
    })
}

/// Standard errors from σ²(X'X)⁻¹ with σ² = RSS / df
fn standard_errors(gram: &Matrix, rss: f64, df: usize, operation: &str) -> Result<Vector> {
    let xtx_inv = gram.inv().map_err(|e| ModelError::NumericalError {
        message: format!("Failed to invert X'X: {e}"),
        operation: operation.to_string(),
    })?;

    let sigma2 = rss / df as f64;
    let cov_matrix = &xtx_inv * sigma2;

    Ok(cov_matrix.diag().mapv(|v| v.sqrt().max(SE_FLOOR)))
}

/// Two-sided t-statistics and p-values under df residual degrees of freedom
fn t_inference(
    coefficients: &Vector,
    std_errors: &Vector,
    df: usize,
    operation: &str,
) -> Result<(Vector, Vector)> {
    let t_statistics: Vector = coefficients
        .iter()
        .zip(std_errors.iter())
        .map(|(&coef, &se)| coef / se)
        .collect();

    let t_dist =
        StudentsT::new(0.0, 1.0, df as f64).map_err(|e| ModelError::NumericalError {
            message: format!("Failed to create t-distribution: {e}"),
            operation: operation.to_string(),
        })?;

    let p_values: Vector = t_statistics
        .iter()
        .map(|&t| {
            let p = 2.0 * (1.0 - t_dist.cdf(t.abs()));
            p.clamp(0.0, 1.0)
        })
        .collect();

    Ok((t_statistics, p_values))
}
