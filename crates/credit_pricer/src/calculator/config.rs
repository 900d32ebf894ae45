//! TOML configuration for building a [`SpreadCalculator`].
//!
//! A document names either a standard index with its timing
//!
//! ```toml
//! index = "cdx_hy"
//! tenor = 5.0
//! series_rel_start = 0.0274
//!
//! [calibration]
//! max_guess = 2.0
//! ```
//!
//! or spells the contract out in a `[contract]` table:
//!
//! ```toml
//! [contract]
//! tenor = 5.0
//! notional = 100.0
//! recovery_rate = 0.4
//! coupon = 0.01
//! coupon_frequency = 4.0
//! ```
//!
//! The curve is not part of the document; it is supplied to
//! [`CalculatorConfig::build`].

use super::{CalibrationConfig, ContractTerms, IndexConvention, SpreadCalculator};
use crate::error::CdsError;
use credit_core::market_data::DiscountCurve;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Failure to load or apply a calculator configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read configuration file: {0}")]
    FileError(String),

    /// Document is not valid TOML or has unexpected fields.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Required field absent.
    #[error("Missing configuration field: {0}")]
    MissingField(&'static str),

    /// Both an index preset and explicit contract terms were given.
    #[error("Configuration must name either an index or a [contract] table, not both")]
    AmbiguousContract,

    /// Terms or calibration settings out of domain.
    #[error(transparent)]
    Invalid(#[from] CdsError),
}

fn enabled() -> bool {
    true
}

/// Deserialised calculator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Index preset supplying notional, recovery and coupon terms
    #[serde(default)]
    pub index: Option<IndexConvention>,
    /// Maturity of the index series (with `index`)
    #[serde(default)]
    pub tenor: Option<f64>,
    /// Start of the risk period (with `index`, defaults to zero)
    #[serde(default)]
    pub series_rel_start: Option<f64>,
    /// Valuation time (with `index`)
    #[serde(default)]
    pub valuation_time: Option<f64>,
    /// Explicit contract terms
    #[serde(default)]
    pub contract: Option<ContractTerms<f64>>,
    /// Hazard bracket and solver settings
    #[serde(default)]
    pub calibration: CalibrationConfig<f64>,
    /// Include the premium accrued at default
    #[serde(default = "enabled")]
    pub accrual_adjustment: bool,
}

impl CalculatorConfig {
    /// Parse a configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Resolve the contract terms described by the document.
    ///
    /// The terms are not validated here; [`build`](Self::build) does that.
    pub fn contract_terms(&self) -> Result<ContractTerms<f64>, ConfigError> {
        let has_index_timing =
            self.tenor.is_some() || self.series_rel_start.is_some() || self.valuation_time.is_some();

        match (self.index, self.contract) {
            (Some(index), None) => {
                let tenor = self.tenor.ok_or(ConfigError::MissingField("tenor"))?;
                Ok(index.terms(
                    tenor,
                    self.series_rel_start.unwrap_or(0.0),
                    self.valuation_time,
                ))
            }
            (None, Some(terms)) if !has_index_timing => Ok(terms),
            (None, None) => Err(ConfigError::MissingField("index")),
            _ => Err(ConfigError::AmbiguousContract),
        }
    }

    /// Build a calculator over `discount_curve`.
    pub fn build<C>(&self, discount_curve: Rc<C>) -> Result<SpreadCalculator<f64, C>, ConfigError>
    where
        C: DiscountCurve<f64> + ?Sized,
    {
        let terms = self.contract_terms()?;
        let mut calculator =
            SpreadCalculator::new(discount_curve, terms)?.with_calibration(self.calibration)?;
        calculator.set_accrual_adjustment(self.accrual_adjustment);
        Ok(calculator)
    }
}
