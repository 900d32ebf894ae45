//! Discount curve capability trait.

use super::segment::{DiscountFactorSeries, DiscountRateSeries};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Reject intervals with reversed or non-finite bounds.
pub(crate) fn check_interval<T: Float>(start: T, end: T) -> Result<(), MarketDataError> {
    if !start.is_finite() || !end.is_finite() || start > end {
        return Err(MarketDataError::InvalidInterval {
            start: start.to_f64().unwrap_or(f64::NAN),
            end: end.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Discount curve queried over time intervals.
///
/// Legs depend only on this trait, so any curve variant (flat, piecewise,
/// externally bootstrapped) can be priced against.
///
/// # Contract
///
/// - `discount_rate(s, e)` returns the single rate representing `[s, e]`
/// - `discount_rate_series(s, e)` returns contiguous piecewise-constant
///   segments whose union is exactly `[s, e]`
/// - `discount_factor(s, e)` returns the factor moving value from `e` to `s`
/// - `discount_factor_series(s, e)` returns the per-segment factors
///
/// Every method fails with [`MarketDataError::InvalidInterval`] when
/// `s > e` or either bound is not finite.
///
/// # Example
///
/// ```
/// use credit_core::market_data::{DiscountCurve, PiecewiseFlatCurve};
///
/// let curve = PiecewiseFlatCurve::new(&[1.0_f64, 2.0], &[0.01, 0.03]).unwrap();
///
/// let series = curve.discount_rate_series(0.5, 1.5).unwrap();
/// assert_eq!(series.len(), 2);
///
/// let df = curve.discount_factor(0.5, 1.5).unwrap();
/// assert!((df - (-0.02_f64).exp()).abs() < 1e-14);
/// ```
pub trait DiscountCurve<T: Float> {
    /// Return the single discount rate representing `[start, end]`.
    fn discount_rate(&self, start: T, end: T) -> Result<T, MarketDataError>;

    /// Return the piecewise-constant rate segmentation of `[start, end]`.
    fn discount_rate_series(
        &self,
        start: T,
        end: T,
    ) -> Result<DiscountRateSeries<T>, MarketDataError>;

    /// Return the discount factor from `end` back to `start`.
    ///
    /// # Default Implementation
    ///
    /// ```text
    /// D(s, e) = Π_i exp(-r_i (e_i - s_i))
    /// ```
    fn discount_factor(&self, start: T, end: T) -> Result<T, MarketDataError> {
        Ok(self.discount_factor_series(start, end)?.product())
    }

    /// Return the discount factor of every segment of `[start, end]`.
    fn discount_factor_series(
        &self,
        start: T,
        end: T,
    ) -> Result<DiscountFactorSeries<T>, MarketDataError> {
        Ok(self.discount_rate_series(start, end)?.to_factor_series())
    }

    /// Return the factor moving value from `to` back to `from`.
    ///
    /// Equal to `discount_factor(from, to)` when `from <= to` and to its
    /// reciprocal `1 / discount_factor(to, from)` otherwise, so value can
    /// be carried forward as well as discounted.
    fn relative_discount_factor(&self, from: T, to: T) -> Result<T, MarketDataError> {
        if to >= from {
            self.discount_factor(from, to)
        } else {
            Ok(T::one() / self.discount_factor(to, from)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::RateSegment;
    use approx::assert_relative_eq;

    // Two-regime mock: 1% before t = 1, 3% after
    struct MockCurve;

    impl DiscountCurve<f64> for MockCurve {
        fn discount_rate(&self, start: f64, end: f64) -> Result<f64, MarketDataError> {
            check_interval(start, end)?;
            Ok(if end <= 1.0 { 0.01 } else { 0.03 })
        }

        fn discount_rate_series(
            &self,
            start: f64,
            end: f64,
        ) -> Result<DiscountRateSeries<f64>, MarketDataError> {
            check_interval(start, end)?;
            if start < 1.0 && end > 1.0 {
                DiscountRateSeries::new(vec![
                    RateSegment::new(0.01, start, 1.0),
                    RateSegment::new(0.03, 1.0, end),
                ])
            } else {
                DiscountRateSeries::single(self.discount_rate(start, end)?, start, end)
            }
        }
    }

    #[test]
    fn test_default_discount_factor() {
        let df = MockCurve.discount_factor(0.0, 2.0).unwrap();
        assert_relative_eq!(df, (-0.04_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_default_factor_series() {
        let series = MockCurve.discount_factor_series(0.5, 1.5).unwrap();
        assert_eq!(series.len(), 2);
        assert_relative_eq!(series.segments()[0].factor, (-0.005_f64).exp());
        assert_relative_eq!(series.segments()[1].factor, (-0.015_f64).exp());
    }

    #[test]
    fn test_relative_factor_forward_and_backward() {
        let forward = MockCurve.relative_discount_factor(0.5, 1.5).unwrap();
        let backward = MockCurve.relative_discount_factor(1.5, 0.5).unwrap();
        assert_relative_eq!(forward * backward, 1.0, epsilon = 1e-15);
        assert!(backward > 1.0);
    }

    #[test]
    fn test_relative_factor_same_point() {
        assert_eq!(MockCurve.relative_discount_factor(0.7, 0.7).unwrap(), 1.0);
    }

    #[test]
    fn test_reversed_interval_rejected() {
        let result = MockCurve.discount_factor(2.0, 1.0);
        assert_eq!(
            result,
            Err(MarketDataError::InvalidInterval {
                start: 2.0,
                end: 1.0
            })
        );
    }

    #[test]
    fn test_non_finite_interval_rejected() {
        assert!(MockCurve.discount_rate_series(0.0, f64::INFINITY).is_err());
        assert!(MockCurve.discount_rate(f64::NAN, 1.0).is_err());
    }
}
