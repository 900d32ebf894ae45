//! Piecewise-constant segmentations of a time interval.
//!
//! A curve answers interval queries with an ordered series of segments
//! whose union is exactly the queried interval. The position of a segment
//! in the series is its id.

use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::slice;

/// Constant continuously compounded rate over `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSegment<T: Float> {
    /// Rate applying on the segment
    pub rate: T,
    /// Segment start (years)
    pub start: T,
    /// Segment end (years)
    pub end: T,
}

impl<T: Float> RateSegment<T> {
    /// Create a rate segment.
    #[inline]
    pub fn new(rate: T, start: T, end: T) -> Self {
        Self { rate, start, end }
    }

    /// Segment length in years.
    #[inline]
    pub fn length(&self) -> T {
        self.end - self.start
    }

    /// Discount factor across the segment, `exp(-rate * length)`.
    #[inline]
    pub fn discount_factor(&self) -> T {
        (-self.rate * self.length()).exp()
    }
}

/// Discount factor accumulated over `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorSegment<T: Float> {
    /// Discount factor across the segment
    pub factor: T,
    /// Segment start (years)
    pub start: T,
    /// Segment end (years)
    pub end: T,
}

impl<T: Float> FactorSegment<T> {
    /// Create a factor segment.
    #[inline]
    pub fn new(factor: T, start: T, end: T) -> Self {
        Self { factor, start, end }
    }
}

/// Check that `(start, end)` pairs are finite, ordered and contiguous.
fn validate_bounds<T: Float>(
    bounds: impl Iterator<Item = (T, T)>,
) -> Result<(), MarketDataError> {
    let mut previous_end: Option<T> = None;
    let mut count = 0usize;

    for (index, (start, end)) in bounds.enumerate() {
        count += 1;
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(MarketDataError::MalformedSegmentation {
                reason: format!(
                    "segment {} has bounds [{}, {}]",
                    index,
                    start.to_f64().unwrap_or(f64::NAN),
                    end.to_f64().unwrap_or(f64::NAN)
                ),
            });
        }
        if let Some(prev) = previous_end {
            if start != prev {
                return Err(MarketDataError::MalformedSegmentation {
                    reason: format!(
                        "segment {} starts at {} but segment {} ends at {}",
                        index,
                        start.to_f64().unwrap_or(f64::NAN),
                        index - 1,
                        prev.to_f64().unwrap_or(f64::NAN)
                    ),
                });
            }
        }
        previous_end = Some(end);
    }

    if count == 0 {
        return Err(MarketDataError::MalformedSegmentation {
            reason: "empty segment series".to_string(),
        });
    }
    Ok(())
}

/// Ordered, contiguous series of rate segments.
///
/// # Invariants
///
/// - At least one segment
/// - Every segment has finite bounds with `start <= end`
/// - Segment `i + 1` starts exactly where segment `i` ends
///
/// # Example
///
/// ```
/// use credit_core::market_data::{DiscountRateSeries, RateSegment};
///
/// let series = DiscountRateSeries::new(vec![
///     RateSegment::new(0.01_f64, 0.0, 1.0),
///     RateSegment::new(0.02, 1.0, 3.0),
/// ])
/// .unwrap();
///
/// assert_eq!(series.start(), 0.0);
/// assert_eq!(series.end(), 3.0);
/// assert_eq!(series.len(), 2);
///
/// // A gap between segments is rejected
/// assert!(DiscountRateSeries::new(vec![
///     RateSegment::new(0.01_f64, 0.0, 1.0),
///     RateSegment::new(0.02, 1.5, 3.0),
/// ])
/// .is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountRateSeries<T: Float> {
    segments: Vec<RateSegment<T>>,
}

impl<T: Float> DiscountRateSeries<T> {
    /// Build a series, validating the segmentation invariants.
    pub fn new(segments: Vec<RateSegment<T>>) -> Result<Self, MarketDataError> {
        validate_bounds(segments.iter().map(|s| (s.start, s.end)))?;
        for (index, segment) in segments.iter().enumerate() {
            if !segment.rate.is_finite() {
                return Err(MarketDataError::MalformedSegmentation {
                    reason: format!("segment {} has non-finite rate", index),
                });
            }
        }
        Ok(Self { segments })
    }

    /// Series made of the single segment `[start, end]` at `rate`.
    pub fn single(rate: T, start: T, end: T) -> Result<Self, MarketDataError> {
        Self::new(vec![RateSegment::new(rate, start, end)])
    }

    /// Start of the first segment.
    #[inline]
    pub fn start(&self) -> T {
        self.segments[0].start
    }

    /// End of the last segment.
    #[inline]
    pub fn end(&self) -> T {
        self.segments[self.segments.len() - 1].end
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a series holds at least one segment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments in time order.
    pub fn iter(&self) -> slice::Iter<'_, RateSegment<T>> {
        self.segments.iter()
    }

    /// Segments as a slice.
    pub fn segments(&self) -> &[RateSegment<T>] {
        &self.segments
    }

    /// Map every segment to its discount factor.
    pub fn to_factor_series(&self) -> DiscountFactorSeries<T> {
        DiscountFactorSeries {
            segments: self
                .segments
                .iter()
                .map(|s| FactorSegment::new(s.discount_factor(), s.start, s.end))
                .collect(),
        }
    }
}

impl<'a, T: Float> IntoIterator for &'a DiscountRateSeries<T> {
    type Item = &'a RateSegment<T>;
    type IntoIter = slice::Iter<'a, RateSegment<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Ordered, contiguous series of discount-factor segments.
///
/// Same invariants as [`DiscountRateSeries`]; factors must be positive.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountFactorSeries<T: Float> {
    segments: Vec<FactorSegment<T>>,
}

impl<T: Float> DiscountFactorSeries<T> {
    /// Build a series, validating the segmentation invariants.
    pub fn new(segments: Vec<FactorSegment<T>>) -> Result<Self, MarketDataError> {
        validate_bounds(segments.iter().map(|s| (s.start, s.end)))?;
        for (index, segment) in segments.iter().enumerate() {
            if !(segment.factor > T::zero()) || !segment.factor.is_finite() {
                return Err(MarketDataError::MalformedSegmentation {
                    reason: format!(
                        "segment {} has factor {}",
                        index,
                        segment.factor.to_f64().unwrap_or(f64::NAN)
                    ),
                });
            }
        }
        Ok(Self { segments })
    }

    /// Start of the first segment.
    #[inline]
    pub fn start(&self) -> T {
        self.segments[0].start
    }

    /// End of the last segment.
    #[inline]
    pub fn end(&self) -> T {
        self.segments[self.segments.len() - 1].end
    }

    /// Number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a series holds at least one segment.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterate over segments in time order.
    pub fn iter(&self) -> slice::Iter<'_, FactorSegment<T>> {
        self.segments.iter()
    }

    /// Segments as a slice.
    pub fn segments(&self) -> &[FactorSegment<T>] {
        &self.segments
    }

    /// Cumulative discount factor over the whole covered interval.
    pub fn product(&self) -> T {
        self.segments
            .iter()
            .fold(T::one(), |acc, s| acc * s.factor)
    }
}

impl<'a, T: Float> IntoIterator for &'a DiscountFactorSeries<T> {
    type Item = &'a FactorSegment<T>;
    type IntoIter = slice::Iter<'a, FactorSegment<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
