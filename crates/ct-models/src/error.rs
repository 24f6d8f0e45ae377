//! Model-related error types

use thiserror::Error;

/// Model-related errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Too few observations for the requested estimate
    #[error("Not enough data: {n_samples} observations, need at least {required}")]
    InsufficientData {
        /// Number of observations available
        n_samples: usize,
        /// Minimum number required
        required: usize,
    },

    /// Covariance matrix not invertible even after regularization
    #[error("Singular covariance matrix (operation: {operation})")]
    SingularMatrix {
        /// Operation that failed
        operation: String,
    },

    /// Numerical computation error
    #[error("Numerical error: {message} (operation: {operation})")]
    NumericalError {
        /// Error message
        message: String,
        /// Operation that failed
        operation: String,
    },
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
