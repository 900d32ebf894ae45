//! Market data structures for credit pricing.
//!
//! This module provides the discount curve capability interface consumed by
//! the protection and premium legs, plus flat and piecewise-flat curves.
//!
//! # Architecture
//!
//! All structures are generic over `T: Float`. Curves expose interior
//! mutability through `&self` so that a single instance can be shared via
//! `Rc` between a calculator and both of its legs and re-rated in place.
//!
//! # Components
//!
//! - [`curves`]: Discount curve trait, segment series and implementations
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use credit_core::market_data::{DiscountCurve, FlatRateCurve};
//!
//! let curve = FlatRateCurve::new(0.05_f64).unwrap();
//! let df = curve.discount_factor(0.0, 1.0).unwrap();
//! assert!((df - 0.951229).abs() < 1e-5);
//!
//! curve.update_rate(0.0).unwrap();
//! assert_eq!(curve.discount_factor(0.0, 1.0).unwrap(), 1.0);
//! ```

pub mod curves;
pub mod error;

// Re-export commonly used types
pub use curves::{
    DiscountCurve, DiscountFactorSeries, DiscountRateSeries, FactorSegment, FlatRateCurve,
    PiecewiseFlatCurve, RateSegment,
};
pub use error::MarketDataError;
