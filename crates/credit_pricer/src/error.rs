//! Error types for leg valuation and hazard calibration.
//!
//! - [`CalibrationError`]: Failure to invert a market price into a hazard rate
//! - [`CdsError`]: Umbrella error returned by every leg and calculator operation

use credit_core::market_data::MarketDataError;
use credit_core::types::{ParameterError, SolverError};
use thiserror::Error;

/// Hazard calibration failure.
///
/// Every variant carries the target price and the bracket searched, so a
/// caller can retry with a wider bracket without re-deriving the inputs.
///
/// # Examples
///
/// ```
/// use credit_pricer::CalibrationError;
///
/// let err = CalibrationError::NotBracketed {
///     price: -6.8723,
///     min_guess: 1e-5,
///     max_guess: 0.01,
/// };
/// assert!(format!("{}", err).contains("[0.00001, 0.01]"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalibrationError {
    /// Bracket that is reversed, negative or not finite.
    #[error("Invalid hazard bracket [{min_guess}, {max_guess}]")]
    InvalidBracket {
        /// Lower hazard guess
        min_guess: f64,
        /// Upper hazard guess
        max_guess: f64,
    },

    /// Upfront minus price has the same sign at both ends of the bracket.
    #[error("Price {price} is not bracketed by hazard rates [{min_guess}, {max_guess}]")]
    NotBracketed {
        /// Target upfront price
        price: f64,
        /// Lower hazard guess
        min_guess: f64,
        /// Upper hazard guess
        max_guess: f64,
    },

    /// Root finder ran out of iterations.
    #[error("Hazard calibration for price {price} did not converge after {iterations} iterations")]
    NotConverged {
        /// Target upfront price
        price: f64,
        /// Iterations performed
        iterations: usize,
    },

    /// Upfront evaluation produced NaN or infinity.
    #[error("Numerical instability calibrating price {price}: {message}")]
    NumericalInstability {
        /// Target upfront price
        price: f64,
        /// Description of the numerical issue
        message: String,
    },
}

/// Error returned by leg valuation, calculator mutation and calibration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CdsError {
    /// Discount curve query failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Out-of-domain model or contract parameter.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Root finder failure outside calibration.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Hazard calibration failure.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}
