//! Tests for the trend estimators
//!
//! Covers slope/intercept recovery, the degenerate zero-residual and
//! constant-series cases, OLS/GLS agreement at ρ = 0, and the widening
//! of GLS inference under positive autocorrelation.

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Distribution;

use ct_core::ExtractedSeries;

use crate::acf::lag1_autocorrelation;
use crate::error::ModelError;
use crate::lm::{gls, ols, FitMethod};

// ==================== Test Fixtures ====================

fn series(pairs: Vec<(i32, f64)>) -> ExtractedSeries {
    ExtractedSeries::new(pairs).unwrap()
}

/// Perfect linear trend: 0.5 per year from 300.0
fn perfect_line() -> ExtractedSeries {
    series(vec![
        (1990, 300.0),
        (1991, 300.5),
        (1992, 301.0),
        (1993, 301.5),
    ])
}

/// No signal at all
fn constant_series() -> ExtractedSeries {
    series(vec![(1990, 300.0), (1991, 300.0), (1992, 300.0)])
}

/// Linear trend plus seeded Gaussian noise
fn noisy_trend(n: usize, intercept: f64, slope: f64, sigma: f64) -> ExtractedSeries {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = rand_distr::Normal::new(0.0, sigma).unwrap();

    let pairs = (0..n)
        .map(|t| {
            let year = 1990 + t as i32;
            let value = intercept + slope * t as f64 + normal.sample(&mut rng);
            (year, value)
        })
        .collect();

    series(pairs)
}

/// Linear trend plus a persistent (positively autocorrelated) wiggle
fn persistent_wiggle() -> ExtractedSeries {
    let pairs = (0..20)
        .map(|t| {
            let wiggle = if (t / 5) % 2 == 0 { 0.6 } else { -0.6 };
            (1990 + t as i32, 300.0 + 0.05 * t as f64 + wiggle)
        })
        .collect();

    series(pairs)
}

// ==================== OLS Tests ====================

#[test]
fn ols_recovers_exact_line() {
    let fit = ols::fit(&perfect_line()).unwrap();

    assert_eq!(fit.method, FitMethod::Ols);
    assert_abs_diff_eq!(fit.intercept.estimate, 300.0, epsilon = 1e-8);
    assert_abs_diff_eq!(fit.slope.estimate, 0.5, epsilon = 1e-8);

    // Zero residuals: the standard-error floor keeps the t-statistic
    // finite and the p-value collapses toward zero.
    assert!(fit.slope_p_value() < 1e-6);
    assert_abs_diff_eq!(fit.r_squared, 1.0, epsilon = 1e-10);
}

#[test]
fn ols_fitted_values_track_exact_line() {
    let data = perfect_line();
    let fit = ols::fit(&data).unwrap();

    for (fitted, observed) in fit.fitted_values.iter().zip(data.values()) {
        assert_abs_diff_eq!(fitted, observed, epsilon = 1e-8);
    }
    for residual in fit.residuals.iter() {
        assert_abs_diff_eq!(residual, &0.0, epsilon = 1e-8);
    }
}

#[test]
fn ols_constant_series_has_no_signal() {
    let fit = ols::fit(&constant_series()).unwrap();

    assert_abs_diff_eq!(fit.slope.estimate, 0.0, epsilon = 1e-8);
    assert_abs_diff_eq!(fit.slope_p_value(), 1.0, epsilon = 1e-2);
}

#[test]
fn ols_recovers_slope_under_noise() {
    let fit = ols::fit(&noisy_trend(100, 287.0, 0.5, 0.1)).unwrap();

    assert_abs_diff_eq!(fit.slope.estimate, 0.5, epsilon = 0.01);
    assert_abs_diff_eq!(fit.intercept.estimate, 287.0, epsilon = 0.1);
    assert!(fit.slope_p_value() < 1e-10);
    assert!(fit.slope.std_error > 0.0);
}

#[test]
fn ols_p_value_shrinks_with_sample_size() {
    let short = ols::fit(&noisy_trend(10, 300.0, 0.05, 0.3)).unwrap();
    let long = ols::fit(&noisy_trend(200, 300.0, 0.05, 0.3)).unwrap();

    assert!(long.slope_p_value() < short.slope_p_value());
}

#[test]
fn ols_rejects_insufficient_data() {
    let two_points = series(vec![(1990, 300.0), (1991, 300.5)]);
    assert!(matches!(
        ols::fit(&two_points),
        Err(ModelError::InsufficientData {
            n_samples: 2,
            required: 3
        })
    ));
}

// ==================== GLS Tests ====================

#[test]
fn gls_matches_ols_when_rho_is_zero() {
    let data = noisy_trend(40, 295.0, 0.2, 0.5);
    let ols_fit = ols::fit(&data).unwrap();
    let gls_fit = gls::fit(&data, 0.0).unwrap();

    assert_eq!(gls_fit.method, FitMethod::GlsAr1);
    assert_abs_diff_eq!(gls_fit.slope.estimate, ols_fit.slope.estimate, epsilon = 1e-8);
    assert_abs_diff_eq!(
        gls_fit.intercept.estimate,
        ols_fit.intercept.estimate,
        epsilon = 1e-8
    );
    assert_abs_diff_eq!(
        gls_fit.slope.std_error,
        ols_fit.slope.std_error,
        epsilon = 1e-8
    );
    assert_abs_diff_eq!(
        gls_fit.slope_p_value(),
        ols_fit.slope_p_value(),
        epsilon = 1e-8
    );
}

#[test]
fn gls_widens_inference_under_positive_autocorrelation() {
    let data = persistent_wiggle();
    let ols_fit = ols::fit(&data).unwrap();

    let rho = lag1_autocorrelation(ols_fit.residuals.view()).unwrap();
    assert!(rho > 0.3, "fixture should be persistent, got rho {rho}");

    let gls_fit = gls::fit(&data, rho).unwrap();

    assert!(gls_fit.slope.std_error > ols_fit.slope.std_error);
    assert!((0.0..=1.0).contains(&gls_fit.slope_p_value()));
}

#[test]
fn gls_slope_stays_close_to_ols_slope() {
    let data = persistent_wiggle();
    let ols_fit = ols::fit(&data).unwrap();
    let gls_fit = gls::fit(&data, 0.7).unwrap();

    // Point estimates may differ slightly, not wildly.
    assert_abs_diff_eq!(gls_fit.slope.estimate, ols_fit.slope.estimate, epsilon = 0.1);
}

#[test]
fn gls_survives_near_unit_rho() {
    let data = noisy_trend(30, 300.0, 0.1, 0.2);
    let fit = gls::fit(&data, 0.999).unwrap();
    assert!(fit.slope.estimate.is_finite());
    assert!(fit.slope.std_error.is_finite());
}

#[test]
fn gls_rejects_insufficient_data() {
    let two_points = series(vec![(1990, 300.0), (1991, 300.5)]);
    assert!(matches!(
        gls::fit(&two_points, 0.5),
        Err(ModelError::InsufficientData { .. })
    ));
}

// ==================== Pipeline Tests ====================

#[test]
fn full_estimation_sequence_on_noisy_data() {
    let data = noisy_trend(60, 290.0, 0.03, 0.4);

    let ols_fit = ols::fit(&data).unwrap();
    let rho = lag1_autocorrelation(ols_fit.residuals.view()).unwrap();
    let gls_fit = gls::fit(&data, rho).unwrap();

    assert!((-1.0..=1.0).contains(&rho));
    assert_eq!(ols_fit.df_residual, 58);
    assert_eq!(gls_fit.df_residual, 58);
    assert_abs_diff_eq!(gls_fit.slope.estimate, ols_fit.slope.estimate, epsilon = 0.05);
}
