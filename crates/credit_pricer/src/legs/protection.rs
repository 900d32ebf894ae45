//! Protection leg: the contingent payment on default.

use super::{accrued_discount, check_notional, check_period, check_recovery_rate, to_f64};
use crate::error::CdsError;
use credit_core::hazard::{ConstantHazardFunction, HazardFunction};
use credit_core::market_data::DiscountCurve;
use credit_core::types::ParameterError;
use num_traits::Float;
use std::fmt;
use std::rc::Rc;

/// Protection leg paying `notional × (1 - R)` at default.
///
/// # Pricing
///
/// ```text
/// PV = N (1 - R) ∫ λ e^{-λ(s - t₀)} D(t₀, s) ds / A
/// ```
///
/// over the risk period `[t₀, T]`, where `A` is the accrued discount from
/// `t₀` to the optional valuation time (1 without one).
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use credit_core::market_data::FlatRateCurve;
/// use credit_pricer::legs::ProtectionLeg;
///
/// let curve = Rc::new(FlatRateCurve::new(0.03_f64).unwrap());
/// let mut leg = ProtectionLeg::new(100.0, 0.4, curve).unwrap();
///
/// // No default risk, no protection value
/// assert_eq!(leg.present_value(0.0, 5.0, None).unwrap(), 0.0);
///
/// leg.update_lambda(0.02).unwrap();
/// let pv = leg.present_value(0.0, 5.0, None).unwrap();
/// let expected = 60.0 * 0.02 * (1.0 - (-0.25_f64).exp()) / 0.05;
/// assert!((pv - expected).abs() < 1e-12);
/// ```
pub struct ProtectionLeg<T: Float, C: DiscountCurve<T> + ?Sized = dyn DiscountCurve<T>> {
    notional: T,
    recovery_rate: T,
    discount_curve: Rc<C>,
    hazard: ConstantHazardFunction<T>,
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> ProtectionLeg<T, C> {
    /// Create a protection leg with zero hazard.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::NonPositive`] for a non-positive notional
    /// - [`ParameterError::RecoveryRateOutOfRange`] unless `0 <= R < 1`
    pub fn new(notional: T, recovery_rate: T, discount_curve: Rc<C>) -> Result<Self, CdsError> {
        Ok(Self {
            notional: check_notional(notional)?,
            recovery_rate: check_recovery_rate(recovery_rate)?,
            discount_curve,
            hazard: ConstantHazardFunction::zero(),
        })
    }

    /// Set the default intensity.
    pub fn update_lambda(&mut self, lambda: T) -> Result<(), ParameterError> {
        self.hazard.update_lambda(lambda)
    }

    /// Set the notional.
    pub fn update_notional(&mut self, notional: T) -> Result<(), ParameterError> {
        self.notional = check_notional(notional)?;
        Ok(())
    }

    /// Set the recovery rate.
    pub fn update_recovery_rate(&mut self, recovery_rate: T) -> Result<(), ParameterError> {
        self.recovery_rate = check_recovery_rate(recovery_rate)?;
        Ok(())
    }

    /// Point the leg at another discount curve.
    pub fn update_discount_curve(&mut self, discount_curve: Rc<C>) {
        self.discount_curve = discount_curve;
    }

    /// Notional.
    #[inline]
    pub fn notional(&self) -> T {
        self.notional
    }

    /// Recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> T {
        self.recovery_rate
    }

    /// Amount paid at default, `notional × (1 - R)`.
    #[inline]
    pub fn coverage(&self) -> T {
        self.notional * (T::one() - self.recovery_rate)
    }

    /// Hazard function driving the leg.
    #[inline]
    pub fn hazard(&self) -> &ConstantHazardFunction<T> {
        &self.hazard
    }

    /// Shared discount curve.
    #[inline]
    pub fn discount_curve(&self) -> &Rc<C> {
        &self.discount_curve
    }

    /// Expected discounted default payment over `[start, end]`.
    ///
    /// With `valuation_time` the value is moved from `start` to that date.
    pub fn present_value(
        &self,
        start: T,
        end: T,
        valuation_time: Option<T>,
    ) -> Result<T, CdsError> {
        check_period(start, end)?;
        let accrued = accrued_discount(&*self.discount_curve, start, valuation_time)?;
        let segments = self.discount_curve.discount_rate_series(start, end)?;
        Ok(self.coverage() * self.hazard.discounted_cdf(&segments) / accrued)
    }
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> fmt::Debug for ProtectionLeg<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtectionLeg")
            .field("notional", &to_f64(self.notional))
            .field("recovery_rate", &to_f64(self.recovery_rate))
            .field("hazard_rate", &to_f64(self.hazard.hazard_rate()))
            .finish_non_exhaustive()
    }
}
