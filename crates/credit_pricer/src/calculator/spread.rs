//! Spread quoting units and valuation results.

use credit_core::math::constant;
use num_traits::Float;

/// Unit in which a par spread is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SpreadUnit {
    /// Fraction per annum (0.0347 for 347bp)
    Decimal,
    /// Basis points (347.0 for 347bp)
    #[default]
    BasisPoints,
}

impl SpreadUnit {
    /// Express a decimal spread in this unit.
    ///
    /// ```
    /// use credit_pricer::SpreadUnit;
    ///
    /// assert_eq!(SpreadUnit::Decimal.quote(0.0125_f64), 0.0125);
    /// assert!((SpreadUnit::BasisPoints.quote(0.0125_f64) - 125.0).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn quote<T: Float>(self, spread: T) -> T {
        match self {
            SpreadUnit::Decimal => spread,
            SpreadUnit::BasisPoints => spread * constant(1e4),
        }
    }

    /// Convert a spread quoted in this unit back to a decimal.
    #[inline]
    pub fn to_decimal<T: Float>(self, spread: T) -> T {
        match self {
            SpreadUnit::Decimal => spread,
            SpreadUnit::BasisPoints => spread / constant(1e4),
        }
    }
}

/// Leg values of a contract at one hazard rate.
///
/// The upfront is seen from the protection buyer: protection PV minus
/// premium PV.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CdsValuation<T: Float> {
    /// Hazard rate both legs were valued at.
    pub hazard_rate: T,
    /// Present value of the protection leg.
    pub protection_pv: T,
    /// Present value of the premium leg at the contract coupon.
    pub premium_pv: T,
    /// Protection PV minus premium PV.
    pub upfront: T,
    /// Running spread making the upfront zero (decimal).
    pub par_spread: T,
    /// Premium leg value of a 1bp running coupon.
    pub risky_pv01: T,
}

impl<T: Float> CdsValuation<T> {
    /// Assemble a valuation from the two leg values.
    ///
    /// Both derived quantities rely on the premium leg being linear in the
    /// coupon.
    pub fn new(hazard_rate: T, protection_pv: T, premium_pv: T, coupon: T) -> Self {
        Self {
            hazard_rate,
            protection_pv,
            premium_pv,
            upfront: protection_pv - premium_pv,
            par_spread: coupon * protection_pv / premium_pv,
            risky_pv01: premium_pv / coupon * constant(1e-4),
        }
    }

    /// Par spread in the requested unit.
    #[inline]
    pub fn par_spread_in(&self, unit: SpreadUnit) -> T {
        unit.quote(self.par_spread)
    }
}
