//! Root-finding solvers for hazard-rate calibration.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use credit_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Recover the intensity giving a 5y survival probability of 80%
//! let solver = BrentSolver::new(SolverConfig::default());
//! let lambda = solver
//!     .find_root(|l: f64| (-l * 5.0).exp() - 0.8, 1e-5, 1.0)
//!     .unwrap();
//!
//! assert!((lambda - (-0.8_f64.ln() / 5.0)).abs() < 1e-10);
//! ```

mod brent;
mod config;

pub use brent::{BrentSolver, RootError};
pub use config::SolverConfig;
