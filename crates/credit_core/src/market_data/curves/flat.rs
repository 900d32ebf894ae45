//! Flat discount curve implementation.

use super::segment::DiscountRateSeries;
use super::traits::{check_interval, DiscountCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::cell::Cell;

/// Discount curve with a single constant rate.
///
/// The rate lives in a [`Cell`], so a curve shared through `Rc` can be
/// re-rated in place and every holder sees the new rate on its next query.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use credit_core::market_data::{DiscountCurve, FlatRateCurve};
///
/// let curve = Rc::new(FlatRateCurve::new(0.05_f64).unwrap());
/// let shared = Rc::clone(&curve);
///
/// // Discount factor over one year: exp(-0.05) ≈ 0.9512
/// let df = shared.discount_factor(0.0, 1.0).unwrap();
/// assert!((df - 0.951229).abs() < 1e-5);
///
/// curve.update_rate(0.02).unwrap();
/// assert_eq!(shared.discount_rate(0.0, 5.0).unwrap(), 0.02);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRateCurve<T: Float> {
    /// The constant continuously compounded rate
    rate: Cell<T>,
}

fn check_rate<T: Float>(rate: T) -> Result<T, MarketDataError> {
    if !rate.is_finite() {
        return Err(MarketDataError::InvalidRate {
            rate: rate.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(rate)
}

impl<T: Float> FlatRateCurve<T> {
    /// Construct a flat curve with the given constant rate.
    ///
    /// Negative rates are accepted.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::InvalidRate`] if `rate` is NaN or infinite.
    #[inline]
    pub fn new(rate: T) -> Result<Self, MarketDataError> {
        Ok(Self {
            rate: Cell::new(check_rate(rate)?),
        })
    }

    /// Return the current rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate.get()
    }

    /// Replace the rate in place.
    ///
    /// # Errors
    ///
    /// [`MarketDataError::InvalidRate`] if `rate` is NaN or infinite; the
    /// previous rate is kept.
    pub fn update_rate(&self, rate: T) -> Result<(), MarketDataError> {
        self.rate.set(check_rate(rate)?);
        Ok(())
    }
}

impl<T: Float> DiscountCurve<T> for FlatRateCurve<T> {
    fn discount_rate(&self, start: T, end: T) -> Result<T, MarketDataError> {
        check_interval(start, end)?;
        Ok(self.rate())
    }

    /// A flat curve always answers with a single segment.
    fn discount_rate_series(
        &self,
        start: T,
        end: T,
    ) -> Result<DiscountRateSeries<T>, MarketDataError> {
        check_interval(start, end)?;
        DiscountRateSeries::single(self.rate(), start, end)
    }

    fn discount_factor(&self, start: T, end: T) -> Result<T, MarketDataError> {
        check_interval(start, end)?;
        Ok((-self.rate() * (end - start)).exp())
    }
}
