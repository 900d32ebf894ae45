//! Market data error types.
//!
//! This module provides structured error handling for discount curve
//! construction and interval queries.

use thiserror::Error;

/// Market data operation errors.
///
/// # Variants
///
/// - `InvalidInterval`: Query interval with `start > end` or non-finite bounds
/// - `MalformedSegmentation`: Segment series that is empty, reversed or has gaps
/// - `InvalidMaturity`: Pillar time that is non-positive or out of order
/// - `InvalidRate`: Non-finite curve rate
/// - `InsufficientData`: Not enough data points for construction
///
/// # Examples
///
/// ```
/// use credit_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidInterval { start: 2.0, end: 1.0 };
/// assert!(format!("{}", err).contains("[2, 1]"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketDataError {
    /// Interval with reversed or non-finite bounds.
    #[error("Invalid interval: [{start}, {end}]")]
    InvalidInterval {
        /// Interval start (years)
        start: f64,
        /// Interval end (years)
        end: f64,
    },

    /// Segment series violating the contiguity contract.
    #[error("Malformed segmentation: {reason}")]
    MalformedSegmentation {
        /// Description of the violation
        reason: String,
    },

    /// Invalid pillar time.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Non-finite curve rate.
    #[error("Invalid rate: r = {rate}")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Number of points required
        need: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_interval_display() {
        let err = MarketDataError::InvalidInterval {
            start: 1.5,
            end: 0.5,
        };
        assert_eq!(format!("{}", err), "Invalid interval: [1.5, 0.5]");
    }

    #[test]
    fn test_malformed_segmentation_display() {
        let err = MarketDataError::MalformedSegmentation {
            reason: "gap between 0.5 and 0.6".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Malformed segmentation: gap between 0.5 and 0.6"
        );
    }

    #[test]
    fn test_invalid_maturity_display() {
        let err = MarketDataError::InvalidMaturity { t: -1.5 };
        assert_eq!(format!("{}", err), "Invalid maturity: t = -1.5");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = MarketDataError::InsufficientData { got: 1, need: 2 };
        assert_eq!(format!("{}", err), "Insufficient data: got 1, need 2");
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = MarketDataError::InvalidRate { rate: f64::NAN };
        let _: &dyn std::error::Error = &err;
    }
}
