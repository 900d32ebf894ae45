//! Error types for structured error handling.
//!
//! This module provides:
//! - `ParameterError`: Out-of-domain model or contract parameters
//! - `SolverError`: Errors from root-finding solvers

use thiserror::Error;

/// Invalid model or contract parameter.
///
/// Raised eagerly when a value outside its economic domain is supplied,
/// instead of letting it flow into the closed-form integrals and produce
/// a finite but meaningless price.
///
/// # Examples
/// ```
/// use credit_core::types::ParameterError;
///
/// let err = ParameterError::NegativeHazardRate { lambda: -0.01 };
/// assert_eq!(format!("{}", err), "Negative hazard rate: lambda = -0.01");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParameterError {
    /// Hazard intensity below zero.
    #[error("Negative hazard rate: lambda = {lambda}")]
    NegativeHazardRate {
        /// The rejected intensity
        lambda: f64,
    },

    /// NaN or infinite input.
    #[error("Non-finite value for {name}: {value}")]
    NonFinite {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Recovery rate outside `[0, 1)`.
    #[error("Recovery rate must lie in [0, 1), got {recovery_rate}")]
    RecoveryRateOutOfRange {
        /// The rejected recovery rate
        recovery_rate: f64,
    },

    /// Zero or negative coupon frequency.
    #[error("Coupon frequency must be positive, got {frequency}")]
    NonPositiveFrequency {
        /// The rejected payments-per-year value
        frequency: f64,
    },

    /// Zero or negative running coupon.
    #[error("Coupon must be positive, got {coupon}")]
    NonPositiveCoupon {
        /// The rejected annual coupon rate
        coupon: f64,
    },

    /// Quantity that must be strictly positive.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Inconsistent contract timing (start, tenor or valuation time).
    #[error("Invalid timing: {reason}")]
    InvalidTiming {
        /// Description of the inconsistency
        reason: String,
    },
}

/// Root-finding solver errors.
///
/// Provides structured error handling for root-finding solver operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: Objective returned a non-finite value
///
/// # Examples
/// ```
/// use credit_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::RecoveryRateOutOfRange { recovery_rate: 1.0 };
        assert_eq!(
            format!("{}", err),
            "Recovery rate must lie in [0, 1), got 1"
        );

        let err = ParameterError::NonFinite {
            name: "notional",
            value: f64::INFINITY,
        };
        assert_eq!(format!("{}", err), "Non-finite value for notional: inf");

        let err = ParameterError::NonPositiveFrequency { frequency: 0.0 };
        assert!(format!("{}", err).contains("positive"));
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::NoBracket { a: 1.0, b: 2.0 };
        assert_eq!(format!("{}", err), "No bracket: f(1) and f(2) have same sign");

        let err = SolverError::NumericalInstability("NaN".to_string());
        assert_eq!(format!("{}", err), "Numerical instability: NaN");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SolverError::MaxIterationsExceeded { iterations: 3 };
        let _: &dyn std::error::Error = &err;
        let err = ParameterError::NegativeHazardRate { lambda: -1.0 };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = ParameterError::InvalidTiming {
            reason: "tenor before start".to_string(),
        };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
