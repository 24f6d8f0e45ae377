//! Lag-1 sample autocorrelation
//!
//! Normalization: biased sample ACF — mean-subtracted with denominator
//! n, the default convention of the common statistical packages. The
//! unbiased variant (denominator n − k) yields materially different ρ
//! for short series, so the choice is fixed here rather than left to
//! the caller.

use ndarray::ArrayView1;

use crate::error::{ModelError, Result};

/// Lag-1 autocorrelation of a residual sequence
///
/// Always in [−1, 1]. A zero-variance sequence (all residuals equal,
/// e.g. a perfect fit) has an undefined ratio and is reported as 0.0:
/// no detectable autocorrelation. Fewer than two observations is an
/// `InsufficientData` error.
pub fn lag1_autocorrelation(residuals: ArrayView1<f64>) -> Result<f64> {
    let n = residuals.len();
    if n < 2 {
        return Err(ModelError::InsufficientData {
            n_samples: n,
            required: 2,
        });
    }

    let mean = residuals.sum() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|&r| r - mean).collect();

    // Cutoff scaled to the residual magnitude, so only truly constant
    // sequences (zero variance at the input's own scale) hit the ρ = 0
    // branch — not genuinely varying but tiny residuals.
    let max_abs = centered.iter().fold(0.0f64, |acc, c| acc.max(c.abs()));
    let denominator: f64 = centered.iter().map(|c| c * c).sum();
    if denominator <= n as f64 * f64::EPSILON * max_abs * max_abs {
        return Ok(0.0);
    }

    let numerator: f64 = centered.windows(2).map(|w| w[0] * w[1]).sum();

    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn alternating_sequence_is_negatively_correlated() {
        let residuals = array![1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let rho = lag1_autocorrelation(residuals.view()).unwrap();
        assert!(rho < 0.0);
        assert!(rho >= -1.0);
    }

    #[test]
    fn persistent_sequence_is_positively_correlated() {
        let residuals = array![1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
        let rho = lag1_autocorrelation(residuals.view()).unwrap();
        assert!(rho > 0.0);
        assert!(rho <= 1.0);
    }

    #[test]
    fn matches_biased_acf_by_hand() {
        // Mean 0; numerator = 1*2 + 2*(-1) + (-1)*(-2) = 2;
        // denominator = 1 + 4 + 1 + 4 = 10.
        let residuals = array![1.0, 2.0, -1.0, -2.0];
        let rho = lag1_autocorrelation(residuals.view()).unwrap();
        assert_abs_diff_eq!(rho, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn bounded_for_arbitrary_sequences() {
        let sequences = [
            vec![0.3, -0.7, 1.9, 2.2, -4.1],
            vec![1e-9, 2e-9],
            vec![5.0, 5.0, 5.0, 6.0],
        ];
        for seq in sequences {
            let rho =
                lag1_autocorrelation(ndarray::Array1::from_vec(seq).view()).unwrap();
            assert!((-1.0..=1.0).contains(&rho), "rho {rho} out of bounds");
        }
    }

    #[test]
    fn tiny_residuals_are_not_mistaken_for_constant() {
        // Same pattern at unit scale and at 1e-9 scale: the lag-1
        // autocorrelation is scale-invariant and must not collapse to 0.
        let unit = array![1.0, 2.0, -1.0, -2.0];
        let tiny = unit.mapv(|r| r * 1e-9);

        let rho_unit = lag1_autocorrelation(unit.view()).unwrap();
        let rho_tiny = lag1_autocorrelation(tiny.view()).unwrap();

        assert_abs_diff_eq!(rho_unit, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(rho_tiny, rho_unit, epsilon = 1e-9);
    }

    #[test]
    fn zero_variance_sequence_reports_zero() {
        let residuals = array![0.0, 0.0, 0.0, 0.0];
        assert_abs_diff_eq!(lag1_autocorrelation(residuals.view()).unwrap(), 0.0);

        let constant = array![3.5, 3.5, 3.5];
        assert_abs_diff_eq!(lag1_autocorrelation(constant.view()).unwrap(), 0.0);
    }

    #[test]
    fn too_short_sequence_is_an_error() {
        let single = array![1.0];
        assert!(matches!(
            lag1_autocorrelation(single.view()),
            Err(ModelError::InsufficientData {
                n_samples: 1,
                required: 2
            })
        ));

        let empty: ndarray::Array1<f64> = array![];
        assert!(lag1_autocorrelation(empty.view()).is_err());
    }
}
