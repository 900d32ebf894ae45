//! Constant-intensity hazard function.

use super::HazardFunction;
use crate::market_data::DiscountRateSeries;
use crate::math::kernels::{phi1, phi2};
use crate::types::{ensure_finite, ParameterError};
use num_traits::Float;

/// Exponentially distributed default time with intensity `λ`.
///
/// `λ = 0` is the degenerate no-default case: every probability and
/// integral stays finite and the default integrals are zero.
///
/// # Closed Forms
///
/// For segment `i` with rate `rᵢ` on `[sᵢ, eᵢ]`, `kᵢ = rᵢ + λ` and
/// `Δᵢ = eᵢ - sᵢ`, a running weight `cᵢ` starts at `c₀ = λ` and carries the
/// survival-times-discount factor to the segment start:
///
/// ```text
/// Aᵢ = Δᵢ φ₁(kᵢ Δᵢ)                     = (1 - e^{-kᵢΔᵢ}) / kᵢ
/// discounted_cdf         = Σ cᵢ Aᵢ
/// discounted_accrual_cdf = Σ cᵢ ((sᵢ - s₀) Aᵢ + Δᵢ² φ₂(kᵢ Δᵢ))
/// cᵢ₊₁ = cᵢ e^{-kᵢ Δᵢ}
/// ```
///
/// # Example
///
/// ```
/// use credit_core::hazard::{ConstantHazardFunction, HazardFunction};
/// use credit_core::market_data::DiscountRateSeries;
///
/// let hazard = ConstantHazardFunction::new(0.02_f64).unwrap();
/// assert!((hazard.survival_probability(0.0, 5.0) - (-0.1_f64).exp()).abs() < 1e-15);
///
/// // Without discounting the integral is the default probability
/// let undiscounted = DiscountRateSeries::single(0.0, 0.0, 5.0).unwrap();
/// let pd = hazard.discounted_cdf(&undiscounted);
/// assert!((pd - hazard.default_probability(0.0, 5.0)).abs() < 1e-15);
///
/// assert!(ConstantHazardFunction::new(-0.01_f64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantHazardFunction<T: Float> {
    /// Default intensity, finite and non-negative
    lambda: T,
}

fn check_lambda<T: Float>(lambda: T) -> Result<T, ParameterError> {
    let lambda = ensure_finite("lambda", lambda)?;
    if lambda < T::zero() {
        return Err(ParameterError::NegativeHazardRate {
            lambda: lambda.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(lambda)
}

impl<T: Float> ConstantHazardFunction<T> {
    /// Create a hazard function with intensity `lambda`.
    ///
    /// # Errors
    ///
    /// - [`ParameterError::NonFinite`] if `lambda` is NaN or infinite
    /// - [`ParameterError::NegativeHazardRate`] if `lambda < 0`
    pub fn new(lambda: T) -> Result<Self, ParameterError> {
        Ok(Self {
            lambda: check_lambda(lambda)?,
        })
    }

    /// Hazard function with no default risk.
    pub fn zero() -> Self {
        Self { lambda: T::zero() }
    }

    /// Replace the intensity, keeping the old one on error.
    pub fn update_lambda(&mut self, lambda: T) -> Result<(), ParameterError> {
        self.lambda = check_lambda(lambda)?;
        Ok(())
    }
}

impl<T: Float> Default for ConstantHazardFunction<T> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Float> HazardFunction<T> for ConstantHazardFunction<T> {
    #[inline]
    fn hazard_rate(&self) -> T {
        self.lambda
    }

    /// `λ e^{-λt}`; `t` is expected to be non-negative.
    #[inline]
    fn pdf(&self, t: T) -> T {
        self.lambda * (-self.lambda * t).exp()
    }

    #[inline]
    fn survival_probability(&self, start: T, end: T) -> T {
        (-self.lambda * (end - start)).exp()
    }

    #[inline]
    fn default_probability(&self, start: T, end: T) -> T {
        -(-self.lambda * (end - start)).exp_m1()
    }

    fn discounted_cdf(&self, segments: &DiscountRateSeries<T>) -> T {
        let mut weight = self.lambda;
        let mut total = T::zero();

        for segment in segments {
            let dt = segment.length();
            let kdt = (segment.rate + self.lambda) * dt;
            total = total + weight * dt * phi1(kdt);
            weight = weight * (-kdt).exp();
        }
        total
    }

    fn discounted_accrual_cdf(&self, segments: &DiscountRateSeries<T>) -> T {
        let origin = segments.start();
        let mut weight = self.lambda;
        let mut total = T::zero();

        for segment in segments {
            let dt = segment.length();
            let kdt = (segment.rate + self.lambda) * dt;
            let elapsed = segment.start - origin;
            total = total + weight * (elapsed * dt * phi1(kdt) + dt * dt * phi2(kdt));
            weight = weight * (-kdt).exp();
        }
        total
    }
}
