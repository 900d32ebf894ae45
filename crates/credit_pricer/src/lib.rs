//! # credit_pricer: Constant-Hazard CDS Valuation and Calibration
//!
//! ## Business Layer Role
//!
//! credit_pricer builds on credit_core's curves, hazard functions and
//! solver:
//! - Protection and premium legs over a shared discount curve (`legs`)
//! - Upfront valuation, hazard calibration and par spreads (`calculator`)
//! - Index conventions for CDX IG, CDX HY and iTraxx Europe
//! - Error taxonomy for valuation and calibration failures (`error`)
//!
//! ## Usage Example
//!
//! ```rust
//! use std::rc::Rc;
//! use credit_core::market_data::FlatRateCurve;
//! use credit_pricer::{ContractTerms, SpreadCalculator, SpreadUnit};
//!
//! let curve = Rc::new(FlatRateCurve::new(0.03_f64).unwrap());
//! let terms = ContractTerms::new(5.0, 100.0, 0.4, 0.01, 4.0);
//! let mut calculator = SpreadCalculator::new(curve, terms).unwrap();
//!
//! // Upfront of 2.55 points paid by the protection buyer
//! let lambda = calculator.calculate_hazard(2.55).unwrap();
//! let spread = calculator
//!     .calculate_par_spread(lambda, SpreadUnit::BasisPoints)
//!     .unwrap();
//!
//! assert!((lambda - 0.026357).abs() < 1e-6);
//! assert!((spread - 158.745).abs() < 1e-3);
//! ```
//!
//! ## Logging
//!
//! Evaluations and calibrations emit `tracing` events at `debug` level and
//! calibration failures at `warn`. No subscriber is installed by the crate.
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for terms, results and errors, plus
//!   TOML calculator configuration (`calculator::config`)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calculator;
pub mod error;
pub mod legs;

pub use calculator::{
    CalibrationConfig, CdsValuation, ContractTerms, IndexConvention, ParseIndexError,
    SpreadCalculator, SpreadUnit,
};
pub use error::{CalibrationError, CdsError};

#[cfg(feature = "serde")]
pub use calculator::config::{CalculatorConfig, ConfigError};
