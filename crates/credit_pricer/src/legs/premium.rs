//! Premium leg: running coupons plus premium accrued at default.

use super::{
    accrued_discount, check_coupon, check_coupon_frequency, check_notional, check_period, to_f64,
};
use crate::error::CdsError;
use credit_core::hazard::{ConstantHazardFunction, HazardFunction};
use credit_core::market_data::DiscountCurve;
use credit_core::types::ParameterError;
use num_traits::Float;
use std::fmt;
use std::rc::Rc;

/// Coupon grid covering `[start, end]`.
///
/// Boundaries are multiples of `1 / frequency` anchored at time zero, from
/// `floor(start·f)/f` through `ceil(end·f)/f`. The first and last periods
/// may stick out of the risk period; they still pay a full coupon.
pub(crate) fn accrual_boundaries<T: Float>(start: T, end: T, frequency: T) -> Vec<T> {
    let last = (end * frequency).ceil();
    let mut index = (start * frequency).floor();
    let mut boundaries = Vec::new();
    while index <= last {
        boundaries.push(index / frequency);
        index = index + T::one();
    }
    boundaries
}

/// Premium leg paying `notional × coupon / frequency` per period.
///
/// # Pricing
///
/// For each accrual period `[aⱼ, bⱼ]` of the coupon grid:
///
/// ```text
/// baseⱼ = D(t₀, bⱼ) · S(t₀, bⱼ)
/// PVⱼ   = N c / f · baseⱼ + N c · baseⱼ · ∫ (s - aⱼ) λ e^{-λ(s - aⱼ)} D(aⱼ, s) ds
/// ```
///
/// The second term is the accrual adjustment and can be switched off with
/// [`set_accrual_adjustment`](Self::set_accrual_adjustment). The sum is
/// divided by the accrued discount to the optional valuation time.
pub struct PremiumLeg<T: Float, C: DiscountCurve<T> + ?Sized = dyn DiscountCurve<T>> {
    notional: T,
    coupon: T,
    coupon_frequency: T,
    accrual_adjustment: bool,
    discount_curve: Rc<C>,
    hazard: ConstantHazardFunction<T>,
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> PremiumLeg<T, C> {
    /// Create a premium leg with zero hazard and accrual adjustment on.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::NonPositive`] for a non-positive notional
    /// - [`ParameterError::NonPositiveCoupon`] for a non-positive coupon
    /// - [`ParameterError::NonPositiveFrequency`] for a non-positive frequency
    pub fn new(
        notional: T,
        coupon: T,
        coupon_frequency: T,
        discount_curve: Rc<C>,
    ) -> Result<Self, CdsError> {
        Ok(Self {
            notional: check_notional(notional)?,
            coupon: check_coupon(coupon)?,
            coupon_frequency: check_coupon_frequency(coupon_frequency)?,
            accrual_adjustment: true,
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

    /// Set the annual coupon rate.
    pub fn update_coupon(&mut self, coupon: T) -> Result<(), ParameterError> {
        self.coupon = check_coupon(coupon)?;
        Ok(())
    }

    /// Set the number of coupon payments per year.
    pub fn update_coupon_frequency(&mut self, coupon_frequency: T) -> Result<(), ParameterError> {
        self.coupon_frequency = check_coupon_frequency(coupon_frequency)?;
        Ok(())
    }

    /// Enable or disable the premium accrued at default.
    pub fn set_accrual_adjustment(&mut self, enabled: bool) {
        self.accrual_adjustment = enabled;
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

    /// Annual coupon rate.
    #[inline]
    pub fn coupon(&self) -> T {
        self.coupon
    }

    /// Coupon payments per year.
    #[inline]
    pub fn coupon_frequency(&self) -> T {
        self.coupon_frequency
    }

    /// Whether the accrual adjustment is included.
    #[inline]
    pub fn accrual_adjustment(&self) -> bool {
        self.accrual_adjustment
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

    /// Expected discounted coupon stream over `[start, end]`.
    ///
    /// With `valuation_time` the value is moved from `start` to that date.
    pub fn present_value(
        &self,
        start: T,
        end: T,
        valuation_time: Option<T>,
    ) -> Result<T, CdsError> {
        check_period(start, end)?;
        let curve = &*self.discount_curve;
        let accrued = accrued_discount(curve, start, valuation_time)?;

        let annual_coupon = self.notional * self.coupon;
        let standard_payment = annual_coupon / self.coupon_frequency;
        let boundaries = accrual_boundaries(start, end, self.coupon_frequency);

        let mut total_discount = match boundaries.first() {
            Some(&first) => curve.relative_discount_factor(start, first)?,
            None => return Ok(T::zero()),
        };

        let mut pv = T::zero();
        for period in boundaries.windows(2) {
            let (accrual_start, accrual_end) = (period[0], period[1]);
            let segments = curve.discount_rate_series(accrual_start, accrual_end)?;
            total_discount = total_discount * segments.to_factor_series().product();

            let survival = self.hazard.cdf(start, accrual_end, true);
            let base = total_discount * survival;

            let accrued_premium = if self.accrual_adjustment {
                annual_coupon * base * self.hazard.discounted_accrual_cdf(&segments)
            } else {
                T::zero()
            };
            pv = pv + standard_payment * base + accrued_premium;
        }

        Ok(pv / accrued)
    }
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> fmt::Debug for PremiumLeg<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PremiumLeg")
            .field("notional", &to_f64(self.notional))
            .field("coupon", &to_f64(self.coupon))
            .field("coupon_frequency", &to_f64(self.coupon_frequency))
            .field("accrual_adjustment", &self.accrual_adjustment)
            .field("hazard_rate", &to_f64(self.hazard.hazard_rate()))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use credit_core::market_data::FlatRateCurve;

    fn leg(rate: f64, coupon: f64) -> PremiumLeg<f64, FlatRateCurve<f64>> {
        PremiumLeg::new(100.0, coupon, 4.0, Rc::new(FlatRateCurve::new(rate).unwrap())).unwrap()
    }

    // ========================================
    // Coupon Grid Tests
    // ========================================

    #[test]
    fn test_grid_anchored_at_zero() {
        let grid = accrual_boundaries(10.0 / 365.0, 1.0, 4.0_f64);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_grid_extends_past_unaligned_end() {
        let grid = accrual_boundaries(0.3, 0.9, 4.0_f64);
        assert_eq!(grid, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_grid_semi_annual() {
        assert_eq!(accrual_boundaries(0.0, 2.0, 2.0_f64).len(), 5);
    }

    // ========================================
    // Present Value Tests
    // ========================================

    #[test]
    fn test_zero_hazard_is_plain_annuity() {
        let rate = 0.01627;
        let start = 10.0 / 365.0;
        let leg = leg(rate, 0.05);

        // 20 quarterly coupons of 1.25, discounted from the risk start
        let expected: f64 = (1..=20)
            .map(|j| 1.25 * (-rate * (j as f64 / 4.0 - start)).exp())
            .sum();
        assert_relative_eq!(
            leg.present_value(start, 5.0, None).unwrap(),
            expected,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_accrual_adjustment_adds_value_under_default_risk() {
        let mut leg = leg(0.02, 0.01);
        leg.update_lambda(0.1).unwrap();
        let with_accrual = leg.present_value(0.0, 5.0, None).unwrap();

        leg.set_accrual_adjustment(false);
        let without_accrual = leg.present_value(0.0, 5.0, None).unwrap();

        assert!(with_accrual > without_accrual);
        // At most one extra coupon period of accrual in expectation
        assert!(with_accrual - without_accrual < 0.25 * 100.0 * 0.01);
    }

    #[test]
    fn test_pv_linear_in_coupon() {
        let mut low = leg(0.03, 0.01);
        let mut high = leg(0.03, 0.05);
        low.update_lambda(0.04).unwrap();
        high.update_lambda(0.04).unwrap();

        let ratio = high.present_value(0.1, 5.0, None).unwrap()
            / low.present_value(0.1, 5.0, None).unwrap();
        assert_relative_eq!(ratio, 5.0, max_relative = 1e-13);
    }

    #[test]
    fn test_valuation_time_discounts_to_settlement() {
        let mut leg = leg(0.01627, 0.05);
        leg.update_lambda(0.05).unwrap();

        let start = 10.0 / 365.0;
        let at_start = leg.present_value(start, 5.0, None).unwrap();
        let at_settlement = leg.present_value(start, 5.0, Some(3.0 / 365.0)).unwrap();
        assert_relative_eq!(
            at_settlement,
            at_start * (-0.01627_f64 * 7.0 / 365.0).exp(),
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_empty_period_on_grid_point() {
        let leg = leg(0.02, 0.01);
        assert_eq!(leg.present_value(1.0, 1.0, None).unwrap(), 0.0);
    }

    // ========================================
    // Update Tests
    // ========================================

    #[test]
    fn test_frequency_update_keeps_coupon() {
        let mut leg = leg(0.02, 0.05);
        leg.update_coupon_frequency(2.0).unwrap();
        assert_eq!(leg.coupon(), 0.05);
        assert_eq!(leg.coupon_frequency(), 2.0);

        // Ten semi-annual coupons of 2.5
        let expected: f64 = (1..=10)
            .map(|j| 2.5 * (-0.02 * j as f64 / 2.0).exp())
            .sum();
        assert_relative_eq!(
            leg.present_value(0.0, 5.0, None).unwrap(),
            expected,
            max_relative = 1e-13
        );
    }

    #[test]
    fn test_rejected_updates_keep_state() {
        let mut leg = leg(0.02, 0.05);
        assert!(leg.update_coupon(0.0).is_err());
        assert!(leg.update_coupon_frequency(0.0).is_err());
        assert!(leg.update_notional(f64::INFINITY).is_err());
        assert_eq!(leg.coupon(), 0.05);
        assert_eq!(leg.coupon_frequency(), 4.0);
        assert_eq!(leg.notional(), 100.0);
    }
}
