//! # credit_core: Numerical Foundation for Constant-Hazard Credit Pricing
//!
//! ## Foundation Layer Role
//!
//! credit_core is the bottom layer of the workspace, providing:
//! - Discount curve capability trait and curves (`market_data`)
//! - Default-time models and their closed-form discounted integrals (`hazard`)
//! - Root finding and exponential kernels (`math`)
//! - Error types: `ParameterError`, `SolverError` (`types`)
//!
//! ## Zero Dependency Principle
//!
//! The crate has no dependency on other workspace crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error enums
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use credit_core::hazard::{ConstantHazardFunction, HazardFunction};
//! use credit_core::market_data::{DiscountCurve, FlatRateCurve};
//!
//! let curve = FlatRateCurve::new(0.02_f64).unwrap();
//! let hazard = ConstantHazardFunction::new(0.01_f64).unwrap();
//!
//! // Discounted probability of default within five years
//! let series = curve.discount_rate_series(0.0, 5.0).unwrap();
//! let value = hazard.discounted_cdf(&series);
//!
//! let expected = 0.01 * (1.0 - (-0.03_f64 * 5.0).exp()) / 0.03;
//! assert!((value - expected).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for errors, solver configuration
//!   and hazard functions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod hazard;
pub mod market_data;
pub mod math;
pub mod types;
