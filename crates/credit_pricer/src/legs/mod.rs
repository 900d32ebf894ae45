//! Protection and premium legs of a constant-hazard CDS.
//!
//! Each leg owns its own [`ConstantHazardFunction`](credit_core::hazard::ConstantHazardFunction)
//! and shares the discount curve through `Rc`. A
//! [`SpreadCalculator`](crate::SpreadCalculator) keeps both intensities
//! equal; a leg used on its own is updated by its caller.

mod premium;
mod protection;

pub use premium::PremiumLeg;
pub use protection::ProtectionLeg;

use credit_core::market_data::{DiscountCurve, MarketDataError};
use credit_core::types::{ensure_finite, ParameterError};
use num_traits::Float;

/// Lossy conversion for error payloads and log fields.
#[inline]
pub(crate) fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Factor moving a value from the risk-period start to the settlement date.
pub(crate) fn accrued_discount<T, C>(
    curve: &C,
    start: T,
    valuation_time: Option<T>,
) -> Result<T, MarketDataError>
where
    T: Float,
    C: DiscountCurve<T> + ?Sized,
{
    match valuation_time {
        Some(valuation) => curve.relative_discount_factor(start, valuation),
        None => Ok(T::one()),
    }
}

pub(crate) fn check_notional<T: Float>(notional: T) -> Result<T, ParameterError> {
    let notional = ensure_finite("notional", notional)?;
    if notional <= T::zero() {
        return Err(ParameterError::NonPositive {
            name: "notional",
            value: to_f64(notional),
        });
    }
    Ok(notional)
}

pub(crate) fn check_recovery_rate<T: Float>(recovery_rate: T) -> Result<T, ParameterError> {
    let recovery_rate = ensure_finite("recovery_rate", recovery_rate)?;
    if recovery_rate < T::zero() || recovery_rate >= T::one() {
        return Err(ParameterError::RecoveryRateOutOfRange {
            recovery_rate: to_f64(recovery_rate),
        });
    }
    Ok(recovery_rate)
}

pub(crate) fn check_coupon<T: Float>(coupon: T) -> Result<T, ParameterError> {
    let coupon = ensure_finite("coupon", coupon)?;
    if coupon <= T::zero() {
        return Err(ParameterError::NonPositiveCoupon {
            coupon: to_f64(coupon),
        });
    }
    Ok(coupon)
}

pub(crate) fn check_coupon_frequency<T: Float>(frequency: T) -> Result<T, ParameterError> {
    let frequency = ensure_finite("coupon_frequency", frequency)?;
    if frequency <= T::zero() {
        return Err(ParameterError::NonPositiveFrequency {
            frequency: to_f64(frequency),
        });
    }
    Ok(frequency)
}

/// Reject a risk period that is reversed or not finite.
pub(crate) fn check_period<T: Float>(start: T, end: T) -> Result<(), ParameterError> {
    ensure_finite("start", start)?;
    ensure_finite("end", end)?;
    if start > end {
        return Err(ParameterError::InvalidTiming {
            reason: format!(
                "risk period starts at {} after it ends at {}",
                to_f64(start),
                to_f64(end)
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_core::market_data::FlatRateCurve;

    #[test]
    fn test_recovery_rate_bounds() {
        assert!(check_recovery_rate(0.0_f64).is_ok());
        assert!(check_recovery_rate(0.99_f64).is_ok());
        assert_eq!(
            check_recovery_rate(1.0_f64),
            Err(ParameterError::RecoveryRateOutOfRange { recovery_rate: 1.0 })
        );
        assert!(check_recovery_rate(-0.1_f64).is_err());
    }

    #[test]
    fn test_non_positive_inputs() {
        assert!(matches!(
            check_notional(0.0_f64),
            Err(ParameterError::NonPositive { name: "notional", .. })
        ));
        assert_eq!(
            check_coupon(0.0_f64),
            Err(ParameterError::NonPositiveCoupon { coupon: 0.0 })
        );
        assert_eq!(
            check_coupon_frequency(-4.0_f64),
            Err(ParameterError::NonPositiveFrequency { frequency: -4.0 })
        );
        assert!(matches!(
            check_coupon_frequency(f64::NAN),
            Err(ParameterError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_reversed_period() {
        assert!(check_period(0.0_f64, 5.0).is_ok());
        assert!(matches!(
            check_period(5.0_f64, 1.0),
            Err(ParameterError::InvalidTiming { .. })
        ));
    }

    #[test]
    fn test_accrued_discount_moves_value_to_earlier_settlement() {
        let curve = FlatRateCurve::new(0.05_f64).unwrap();
        assert_eq!(accrued_discount(&curve, 1.0, None).unwrap(), 1.0);

        // Settlement before the risk start: dividing by a factor above one
        let factor = accrued_discount(&curve, 1.0, Some(0.5)).unwrap();
        assert!((factor - 0.025_f64.exp()).abs() < 1e-15);
    }
}
