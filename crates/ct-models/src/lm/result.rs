//! Trend fit results

use std::fmt;

use ndarray::Array1;
use serde::Serialize;

/// Estimator that produced a fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FitMethod {
    /// Ordinary least squares, independent errors
    Ols,
    /// Generalized least squares under AR(1) errors
    GlsAr1,
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitMethod::Ols => write!(f, "OLS"),
            FitMethod::GlsAr1 => write!(f, "GLS-AR(1)"),
        }
    }
}

/// Coefficient estimate with inference statistics
#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    /// Coefficient name
    pub name: String,
    /// Point estimate
    pub estimate: f64,
    /// Standard error
    pub std_error: f64,
    /// t-statistic
    pub t_stat: f64,
    /// Two-sided p-value
    pub p_value: f64,
}

/// Fitted linear trend, immutable once constructed
#[derive(Debug, Clone)]
pub struct TrendFit {
    /// Estimator that produced the fit
    pub method: FitMethod,
    /// Intercept coefficient
    pub intercept: Coefficient,
    /// Slope coefficient on the zero-based time index
    pub slope: Coefficient,
    /// Fitted values aligned to the time index
    pub fitted_values: Array1<f64>,
    /// Residuals on the original scale
    pub residuals: Array1<f64>,
    /// Coefficient of determination on the original scale
    pub r_squared: f64,
    /// Residual standard error on the inference scale
    pub residual_std_error: f64,
    /// Residual degrees of freedom (n − 2)
    pub df_residual: usize,
}

impl TrendFit {
    /// Slope point estimate, in value units per year
    pub fn slope(&self) -> f64 {
        self.slope.estimate
    }

    /// Two-sided p-value of the slope
    pub fn slope_p_value(&self) -> f64 {
        self.slope.p_value
    }
}
