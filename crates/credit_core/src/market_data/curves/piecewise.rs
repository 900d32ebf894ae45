//! Piecewise-flat forward rate curve.

use super::segment::{DiscountRateSeries, RateSegment};
use super::traits::{check_interval, DiscountCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::cell::RefCell;

/// Discount curve with piecewise-constant forward rates.
///
/// Rate `r_i` applies on `(t_{i-1}, t_i]` with `t_0 = 0`; the last rate is
/// extrapolated flat beyond the final pillar and the first rate before
/// time zero. Rate series split the queried interval at every pillar lying
/// strictly inside it, so hazard integrals over the series stay exact.
///
/// Rates are held in a [`RefCell`] and can be replaced in place through
/// `&self`, which keeps the curve usable behind a shared `Rc`. Pillar
/// times are fixed at construction.
///
/// # Example
///
/// ```
/// use credit_core::market_data::{DiscountCurve, PiecewiseFlatCurve};
///
/// let curve = PiecewiseFlatCurve::new(&[1.0_f64, 3.0, 5.0], &[0.01, 0.02, 0.03]).unwrap();
///
/// let series = curve.discount_rate_series(0.5, 4.0).unwrap();
/// let rates: Vec<f64> = series.iter().map(|s| s.rate).collect();
/// assert_eq!(rates, vec![0.01, 0.02, 0.03]);
///
/// curve.shift(0.01).unwrap();
/// assert_eq!(curve.rates(), vec![0.02, 0.03, 0.04]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseFlatCurve<T: Float> {
    /// Strictly increasing positive pillar times
    pillars: Vec<T>,
    /// Forward rate ending at each pillar
    rates: RefCell<Vec<T>>,
}

fn check_rates<T: Float>(rates: &[T]) -> Result<(), MarketDataError> {
    match rates.iter().find(|r| !r.is_finite()) {
        Some(rate) => Err(MarketDataError::InvalidRate {
            rate: rate.to_f64().unwrap_or(f64::NAN),
        }),
        None => Ok(()),
    }
}

impl<T: Float> PiecewiseFlatCurve<T> {
    /// Construct a curve from pillar times and forward rates.
    ///
    /// # Errors
    ///
    /// - [`MarketDataError::InsufficientData`]: no pillars, or fewer rates
    ///   than pillars (or more)
    /// - [`MarketDataError::InvalidMaturity`]: pillar that is non-positive,
    ///   non-finite or not strictly after its predecessor
    /// - [`MarketDataError::InvalidRate`]: non-finite rate
    pub fn new(pillars: &[T], rates: &[T]) -> Result<Self, MarketDataError> {
        if pillars.is_empty() {
            return Err(MarketDataError::InsufficientData { got: 0, need: 1 });
        }
        if rates.len() != pillars.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: pillars.len(),
            });
        }

        let mut previous = T::zero();
        for &t in pillars {
            if !t.is_finite() || t <= previous {
                return Err(MarketDataError::InvalidMaturity {
                    t: t.to_f64().unwrap_or(f64::NAN),
                });
            }
            previous = t;
        }
        check_rates(rates)?;

        Ok(Self {
            pillars: pillars.to_vec(),
            rates: RefCell::new(rates.to_vec()),
        })
    }

    /// Pillar times.
    #[inline]
    pub fn pillars(&self) -> &[T] {
        &self.pillars
    }

    /// Snapshot of the current forward rates.
    pub fn rates(&self) -> Vec<T> {
        self.rates.borrow().clone()
    }

    /// Number of pillars.
    #[inline]
    pub fn len(&self) -> usize {
        self.pillars.len()
    }

    /// Always false: construction requires one pillar.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pillars.is_empty()
    }

    /// Replace every forward rate.
    ///
    /// On error the current rates are kept.
    pub fn update_rates(&self, rates: &[T]) -> Result<(), MarketDataError> {
        if rates.len() != self.pillars.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: self.pillars.len(),
            });
        }
        check_rates(rates)?;
        self.rates.borrow_mut().copy_from_slice(rates);
        Ok(())
    }

    /// Replace the forward rate ending at pillar `index`.
    pub fn update_rate_at(&self, index: usize, rate: T) -> Result<(), MarketDataError> {
        if index >= self.pillars.len() {
            return Err(MarketDataError::InsufficientData {
                got: self.pillars.len(),
                need: index + 1,
            });
        }
        check_rates(&[rate])?;
        self.rates.borrow_mut()[index] = rate;
        Ok(())
    }

    /// Add `bump` to every forward rate.
    pub fn shift(&self, bump: T) -> Result<(), MarketDataError> {
        check_rates(&[bump])?;
        let shifted: Vec<T> = self.rates.borrow().iter().map(|&r| r + bump).collect();
        check_rates(&shifted)?;
        *self.rates.borrow_mut() = shifted;
        Ok(())
    }

    /// Index of the rate applying just before `t`: the first pillar at or
    /// after `t`, or the last pillar when `t` is beyond the curve.
    fn rate_index(&self, t: T) -> usize {
        self.pillars
            .iter()
            .position(|&p| p >= t)
            .unwrap_or(self.pillars.len() - 1)
    }

    /// Instantaneous forward rate at `t`.
    pub fn forward_rate(&self, t: T) -> T {
        self.rates.borrow()[self.rate_index(t)]
    }
}

impl<T: Float> DiscountCurve<T> for PiecewiseFlatCurve<T> {
    /// Average rate `-ln(D(s, e)) / (e - s)`; the instantaneous rate at
    /// `start` when the interval is empty.
    fn discount_rate(&self, start: T, end: T) -> Result<T, MarketDataError> {
        check_interval(start, end)?;
        if end == start {
            return Ok(self.forward_rate(start));
        }
        let df = self.discount_factor(start, end)?;
        Ok(-df.ln() / (end - start))
    }

    fn discount_rate_series(
        &self,
        start: T,
        end: T,
    ) -> Result<DiscountRateSeries<T>, MarketDataError> {
        check_interval(start, end)?;
        let rates = self.rates.borrow();

        let mut segments = Vec::new();
        let mut segment_start = start;
        for (index, &pillar) in self.pillars.iter().enumerate() {
            if pillar > segment_start && pillar < end {
                segments.push(RateSegment::new(rates[index], segment_start, pillar));
                segment_start = pillar;
            }
        }
        segments.push(RateSegment::new(
            rates[self.rate_index(end)],
            segment_start,
            end,
        ));

        DiscountRateSeries::new(segments)
    }
}
