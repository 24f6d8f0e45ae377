//! AR(1) error covariance
//!
//! Entry (i, j) is ρ^|i−j|, the geometric decay of first-order
//! autoregressive correlation with time lag. The diagonal carries a
//! small ridge so the Cholesky factorization downstream stays
//! positive-definite for ρ near ±1.

use ndarray::Array2;

/// Constant added to every diagonal entry
pub const DIAGONAL_RIDGE: f64 = 1e-6;

/// Build the n×n AR(1) covariance matrix for autocorrelation ρ
pub fn ar1_covariance(n: usize, rho: f64) -> Array2<f64> {
    let mut cov = Array2::from_shape_fn((n, n), |(i, j)| {
        rho.powi((i as i32 - j as i32).abs())
    });

    for i in 0..n {
        cov[(i, i)] += DIAGONAL_RIDGE;
    }

    cov
}
