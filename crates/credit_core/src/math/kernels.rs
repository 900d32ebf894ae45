//! Exponential integral kernels.
//!
//! Both kernels are entire functions of `x`, so they stay finite where the
//! textbook quotients divide zero by zero.
//!
//! ```text
//! φ₁(x) = (1 - e^{-x}) / x          = ∫₀¹ e^{-xu} du
//! φ₂(x) = (1 - e^{-x}(1 + x)) / x²  = ∫₀¹ u e^{-xu} du
//! ```

use super::constant;
use num_traits::Float;

/// `(1 - e^{-x}) / x`, equal to 1 at `x = 0`.
///
/// # Example
///
/// ```
/// use credit_core::math::kernels::phi1;
///
/// assert_eq!(phi1(0.0_f64), 1.0);
/// assert!((phi1(1.0_f64) - (1.0 - (-1.0_f64).exp())).abs() < 1e-15);
/// ```
#[inline]
pub fn phi1<T: Float>(x: T) -> T {
    if x == T::zero() {
        T::one()
    } else {
        -(-x).exp_m1() / x
    }
}

/// `(1 - e^{-x}(1 + x)) / x²`, equal to 1/2 at `x = 0`.
///
/// Evaluated by its Taylor series near zero, where the direct form loses
/// all significant digits.
#[inline]
pub fn phi2<T: Float>(x: T) -> T {
    if x.abs() < constant(1e-2) {
        // 1/2 - x/3 + x²/8 - x³/30 + x⁴/144
        let c0: T = constant(0.5);
        let c1: T = constant(1.0 / 3.0);
        let c2: T = constant(0.125);
        let c3: T = constant(1.0 / 30.0);
        let c4: T = constant(1.0 / 144.0);
        c0 - x * (c1 - x * (c2 - x * (c3 - x * c4)))
    } else {
        (-(-x).exp_m1() - x * (-x).exp()) / (x * x)
    }
}
