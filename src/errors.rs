//! Error types and validation functions for the MSPC engine.
//!
//! Numeric edge cases (near-singular pivots, negative Cholesky arguments)
//! are absorbed locally via epsilon clamping and never reach this module.
//! Only structurally invalid calls surface as errors: mismatched vector
//! lengths, out-of-range configuration parameters, ragged matrices.

use thiserror::Error;

/// Error types for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MspcError {
    /// Invalid parameter value for an analysis configuration.
    #[error("Invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// Insufficient data for the requested computation.
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum required data points
        required: usize,
        /// Actual number of data points provided
        actual: usize,
    },

    /// Dimension disagreement between two related inputs.
    #[error("Dimension mismatch in {object}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Object whose shape disagreed (e.g. "mean vector")
        object: String,
        /// Expected length or dimension
        expected: usize,
        /// Actual length or dimension
        actual: usize,
    },

    /// Numerical computation error that could not be absorbed by clamping.
    #[error("Numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for the failure
        reason: String,
        /// Operation that failed
        operation: Option<String>,
    },
}

/// Result type for engine operations.
///
/// Convenience alias for operations that may fail with [`MspcError`].
pub type MspcResult<T> = Result<T, MspcError>;

/// Validates that a parameter is within expected bounds (inclusive).
///
/// # Example
/// ```rust
/// use mspc_engine::errors::validate_parameter;
///
/// assert!(validate_parameter(0.05, 0.0, 1.0, "alpha").is_ok());
/// assert!(validate_parameter(1.5, 0.0, 1.0, "alpha").is_err());
/// ```
pub fn validate_parameter(value: f64, min: f64, max: f64, name: &str) -> MspcResult<()> {
    if value.is_nan() {
        return Err(MspcError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "must not be NaN".to_string(),
        });
    }

    if value < min || value > max {
        Err(MspcError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: format!("[{}, {}]", min, max),
        })
    } else {
        Ok(())
    }
}

/// Validates that a vector has exactly the expected length.
pub fn validate_vector_length(v: &[f64], expected: usize, object: &str) -> MspcResult<()> {
    if v.len() != expected {
        Err(MspcError::DimensionMismatch {
            object: object.to_string(),
            expected,
            actual: v.len(),
        })
    } else {
        Ok(())
    }
}
