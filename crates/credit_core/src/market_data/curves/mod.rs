//! Discount curve abstractions.
//!
//! This module provides:
//! - [`DiscountCurve`]: Interval-based discount rate and factor queries
//! - [`DiscountRateSeries`] / [`DiscountFactorSeries`]: Contiguous segmentations
//! - [`FlatRateCurve`]: Constant rate curve, re-ratable in place
//! - [`PiecewiseFlatCurve`]: Piecewise-constant forward rate curve

mod flat;
mod piecewise;
mod segment;
mod traits;

pub use flat::FlatRateCurve;
pub use piecewise::PiecewiseFlatCurve;
pub use segment::{DiscountFactorSeries, DiscountRateSeries, FactorSegment, RateSegment};
pub use traits::DiscountCurve;
