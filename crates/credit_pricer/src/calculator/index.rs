//! Standard CDS index conventions.

use super::terms::ContractTerms;
use credit_core::math::constant;
use num_traits::Float;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unrecognised index convention name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown index convention: {0}. Must be one of: cdx_ig, cdx_hy, itraxx_europe")]
pub struct ParseIndexError(pub String);

/// Market convention of a traded CDS index.
///
/// Every index is quoted on a notional of 100 with quarterly coupons.
///
/// | Index          | Recovery | Coupon |
/// |----------------|----------|--------|
/// | CDX IG         | 40%      | 100bp  |
/// | CDX HY         | 30%      | 500bp  |
/// | iTraxx Europe  | 40%      | 100bp  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexConvention {
    /// CDX North America Investment Grade
    CdxIg,
    /// CDX North America High Yield
    CdxHy,
    /// iTraxx Europe Main
    ItraxxEurope,
}

impl IndexConvention {
    /// Quoting notional.
    #[inline]
    pub fn notional<T: Float>(self) -> T {
        constant(100.0)
    }

    /// Standard recovery assumption.
    pub fn recovery_rate<T: Float>(self) -> T {
        match self {
            IndexConvention::CdxIg | IndexConvention::ItraxxEurope => constant(0.40),
            IndexConvention::CdxHy => constant(0.30),
        }
    }

    /// Fixed running coupon (decimal).
    pub fn coupon<T: Float>(self) -> T {
        match self {
            IndexConvention::CdxIg | IndexConvention::ItraxxEurope => constant(0.01),
            IndexConvention::CdxHy => constant(0.05),
        }
    }

    /// Coupon payments per year.
    #[inline]
    pub fn coupon_frequency<T: Float>(self) -> T {
        constant(4.0)
    }

    /// Contract terms of a series with the given tenor and timing.
    ///
    /// ```
    /// use credit_pricer::IndexConvention;
    ///
    /// let terms = IndexConvention::CdxHy.terms(5.0_f64, 10.0 / 365.0, None);
    /// assert_eq!(terms.coupon, 0.05);
    /// assert_eq!(terms.recovery_rate, 0.3);
    /// ```
    pub fn terms<T: Float>(
        self,
        tenor: T,
        series_rel_start: T,
        valuation_time: Option<T>,
    ) -> ContractTerms<T> {
        ContractTerms::new(
            tenor,
            self.notional(),
            self.recovery_rate(),
            self.coupon(),
            self.coupon_frequency(),
        )
        .with_relative_start(series_rel_start)
        .with_valuation_time(valuation_time)
    }

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexConvention::CdxIg => "cdx_ig",
            IndexConvention::CdxHy => "cdx_hy",
            IndexConvention::ItraxxEurope => "itraxx_europe",
        }
    }
}

impl FromStr for IndexConvention {
    type Err = ParseIndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '.', ' '], "_").as_str() {
            "cdx_ig" | "cdx_na_ig" => Ok(IndexConvention::CdxIg),
            "cdx_hy" | "cdx_na_hy" => Ok(IndexConvention::CdxHy),
            "itraxx_europe" | "itraxx_eur" | "itraxx_main" => Ok(IndexConvention::ItraxxEurope),
            _ => Err(ParseIndexError(s.to_string())),
        }
    }
}

impl fmt::Display for IndexConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
