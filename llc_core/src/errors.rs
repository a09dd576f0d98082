//! # Error Types
//!
//! Structured error types for llc_core. Each variant names the violated
//! constraint so an optimizer driving these calculators can tell a bad input
//! apart from an unreachable design point without parsing strings.
//!
//! ## Example
//!
//! ```rust
//! use llc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_output_voltage(v_out: f64) -> CalcResult<()> {
//!     if v_out <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "output_voltage_v",
//!             v_out.to_string(),
//!             "Output voltage must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(validate_output_voltage(-48.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::equations::gain::ResonanceBranch;

/// Result type alias for llc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value violates a documented precondition
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The gain equation has no real root on the requested side of resonance
    #[error(
        "No real root: gain {gain_target} is unreachable {branch} with Q={quality_factor}, Ln={inductance_ratio}"
    )]
    NoRealRoot {
        gain_target: f64,
        quality_factor: f64,
        inductance_ratio: f64,
        branch: ResonanceBranch,
    },

    /// A closed-form expression broke down (e.g. negative radicand)
    #[error("Calculation failed: {calculation_type} - {reason}")]
    CalculationFailed {
        calculation_type: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a NoRealRoot error
    pub fn no_real_root(gain_target: f64, quality_factor: f64, inductance_ratio: f64, branch: ResonanceBranch) -> Self {
        CalcError::NoRealRoot {
            gain_target,
            quality_factor,
            inductance_ratio,
            branch,
        }
    }

    /// Create a CalculationFailed error
    pub fn calculation_failed(calculation_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::CalculationFailed {
            calculation_type: calculation_type.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if this is an input error
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::NoRealRoot { .. } => "NO_REAL_ROOT",
            CalcError::CalculationFailed { .. } => "CALCULATION_FAILED",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Reject anything that is not a finite, strictly positive number.
pub(crate) fn require_positive(field: &str, value: f64, what: &str) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must be positive", what),
        ));
    }
    Ok(())
}
