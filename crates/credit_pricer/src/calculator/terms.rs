//! Contract economics and calibration settings.

use crate::error::{CalibrationError, CdsError};
use crate::legs::{
    check_coupon, check_coupon_frequency, check_notional, check_recovery_rate, to_f64,
};
use credit_core::math::constant;
use credit_core::math::solvers::SolverConfig;
use credit_core::types::{ensure_finite, ParameterError};
use num_traits::Float;

#[cfg(feature = "serde")]
fn zero<T: Float>() -> T {
    T::zero()
}

/// Economics and timing of a single CDS contract.
///
/// Times are in years from the valuation anchor `t = 0`. The risk period
/// runs from `relative_start` to `tenor`.
///
/// # Example
///
/// ```
/// use credit_pricer::ContractTerms;
///
/// let terms = ContractTerms::new(5.0_f64, 100.0, 0.3, 0.05, 4.0)
///     .with_relative_start(10.0 / 365.0);
/// assert!(terms.validate().is_ok());
///
/// let bad = ContractTerms::new(5.0_f64, 100.0, 1.2, 0.05, 4.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ContractTerms<T: Float> {
    /// Maturity of the risk period (years)
    pub tenor: T,
    /// Contract notional
    pub notional: T,
    /// Recovery rate in `[0, 1)`
    pub recovery_rate: T,
    /// Annual running coupon (decimal)
    pub coupon: T,
    /// Coupon payments per year
    pub coupon_frequency: T,
    /// Start of the risk period (years)
    #[cfg_attr(feature = "serde", serde(default = "zero"))]
    pub relative_start: T,
    /// Settlement date the legs are discounted back to (years)
    #[cfg_attr(feature = "serde", serde(default))]
    pub valuation_time: Option<T>,
}

impl<T: Float> ContractTerms<T> {
    /// Terms starting at time zero with no valuation time.
    pub fn new(tenor: T, notional: T, recovery_rate: T, coupon: T, coupon_frequency: T) -> Self {
        Self {
            tenor,
            notional,
            recovery_rate,
            coupon,
            coupon_frequency,
            relative_start: T::zero(),
            valuation_time: None,
        }
    }

    /// Set the start of the risk period.
    pub fn with_relative_start(mut self, relative_start: T) -> Self {
        self.relative_start = relative_start;
        self
    }

    /// Set the valuation time.
    pub fn with_valuation_time(mut self, valuation_time: Option<T>) -> Self {
        self.valuation_time = valuation_time;
        self
    }

    /// Check every field against its domain.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::NonPositive`]: notional
    /// - [`ParameterError::RecoveryRateOutOfRange`]: recovery rate
    /// - [`ParameterError::NonPositiveCoupon`]: coupon
    /// - [`ParameterError::NonPositiveFrequency`]: coupon frequency
    /// - [`ParameterError::InvalidTiming`]: risk period ending at or before its start
    /// - [`ParameterError::NonFinite`]: any NaN or infinite time
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_notional(self.notional)?;
        check_recovery_rate(self.recovery_rate)?;
        check_coupon(self.coupon)?;
        check_coupon_frequency(self.coupon_frequency)?;

        let tenor = ensure_finite("tenor", self.tenor)?;
        let start = ensure_finite("relative_start", self.relative_start)?;
        if tenor <= start {
            return Err(ParameterError::InvalidTiming {
                reason: format!(
                    "tenor {} must lie after the relative start {}",
                    to_f64(tenor),
                    to_f64(start)
                ),
            });
        }
        if let Some(valuation_time) = self.valuation_time {
            ensure_finite("valuation_time", valuation_time)?;
        }
        Ok(())
    }
}

/// Hazard bracket and root-finder settings for calibration.
///
/// The default bracket `[1e-5, 1]` covers spreads from well under a basis
/// point to several thousand basis points.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationConfig<T: Float> {
    /// Lower end of the hazard bracket
    pub min_guess: T,
    /// Upper end of the hazard bracket
    pub max_guess: T,
    /// Brent solver settings
    pub solver: SolverConfig<T>,
}

impl<T: Float> Default for CalibrationConfig<T> {
    fn default() -> Self {
        Self {
            min_guess: constant(1e-5),
            max_guess: T::one(),
            solver: SolverConfig::default(),
        }
    }
}

impl<T: Float> CalibrationConfig<T> {
    /// Default solver settings over a custom bracket.
    pub fn with_bracket(min_guess: T, max_guess: T) -> Self {
        Self {
            min_guess,
            max_guess,
            ..Self::default()
        }
    }

    /// Check the bracket and the solver settings.
    pub fn validate(&self) -> Result<(), CdsError> {
        check_bracket(self.min_guess, self.max_guess)?;
        self.solver.validate()?;
        Ok(())
    }
}

/// A hazard bracket must satisfy `0 <= min_guess < max_guess`, both finite.
pub(crate) fn check_bracket<T: Float>(min_guess: T, max_guess: T) -> Result<(), CalibrationError> {
    let valid = min_guess.is_finite()
        && max_guess.is_finite()
        && min_guess >= T::zero()
        && min_guess < max_guess;
    if valid {
        Ok(())
    } else {
        Err(CalibrationError::InvalidBracket {
            min_guess: to_f64(min_guess),
            max_guess: to_f64(max_guess),
        })
    }
}
