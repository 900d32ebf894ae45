//! Numerical routines.
//!
//! - [`solvers`]: Bracketing root finders
//! - [`kernels`]: Cancellation-free exponential integrals

pub mod kernels;
pub mod solvers;

use num_traits::Float;

/// Convert an `f64` constant into `T`.
///
/// Yields NaN when `value` is not representable in `T`, so the failure
/// surfaces through the usual non-finite checks.
#[inline]
pub fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
