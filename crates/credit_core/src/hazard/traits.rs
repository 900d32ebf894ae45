//! Hazard function trait definition.

use crate::market_data::DiscountRateSeries;
use num_traits::Float;

/// Default-time model exposed to the pricing legs.
///
/// Time is measured in years from the valuation anchor `t = 0`.
///
/// # Contract
///
/// - `survival_probability(s, e)` is the probability of surviving to `e`
///   given survival to `s`
/// - `discounted_cdf(series)` is `∫ f(s) D(s₀, s) ds` over the series,
///   with `f` the default density conditional on survival to `s₀`
/// - `discounted_accrual_cdf(series)` weights the same integrand by the
///   time elapsed since `s₀`
///
/// where `s₀` is the start of the first segment and `D` the cumulative
/// discount factor built from the segment rates.
pub trait HazardFunction<T: Float> {
    /// Return the default intensity.
    fn hazard_rate(&self) -> T;

    /// Return the default-time density at `t`.
    fn pdf(&self, t: T) -> T;

    /// Return the probability of surviving `[start, end]` given survival
    /// to `start`.
    fn survival_probability(&self, start: T, end: T) -> T;

    /// Return the probability of defaulting within `[start, end]` given
    /// survival to `start`.
    fn default_probability(&self, start: T, end: T) -> T {
        T::one() - self.survival_probability(start, end)
    }

    /// Conditional survival (`survival = true`) or default probability
    /// over `[start, end]`.
    fn cdf(&self, start: T, end: T, survival: bool) -> T {
        if survival {
            self.survival_probability(start, end)
        } else {
            self.default_probability(start, end)
        }
    }

    /// Discounted default density integrated over the series.
    fn discounted_cdf(&self, segments: &DiscountRateSeries<T>) -> T;

    /// Discounted default density weighted by time since the series start.
    fn discounted_accrual_cdf(&self, segments: &DiscountRateSeries<T>) -> T;
}
