//! Upfront valuation, hazard calibration and par spreads.
//!
//! [`SpreadCalculator`] owns a protection leg and a premium leg over one
//! shared discount curve and is the single writer of their hazard rates:
//! every evaluation sets the same `λ` on both legs before valuing them.
//!
//! # Calibration
//!
//! ```text
//! price -> λ*   : evaluate_upfront(λ*) = price        (Brent on [min, max])
//! λ*    -> s    : s = c · PV_protection(λ*) / PV_premium(λ*)
//! ```
//!
//! Protection PV rises and premium PV falls as `λ` grows, so the upfront is
//! strictly increasing in `λ` and a bracket holding a sign change holds
//! exactly one root. Brackets are never widened
//! automatically; a price outside the bracket is reported as
//! [`CalibrationError::NotBracketed`].

mod index;
mod spread;
mod terms;

#[cfg(feature = "serde")]
pub mod config;

pub use index::{IndexConvention, ParseIndexError};
pub use spread::{CdsValuation, SpreadUnit};
pub use terms::{CalibrationConfig, ContractTerms};

use crate::error::{CalibrationError, CdsError};
use crate::legs::{to_f64, PremiumLeg, ProtectionLeg};
use credit_core::hazard::HazardFunction;
use credit_core::market_data::DiscountCurve;
use credit_core::math::solvers::{BrentSolver, RootError};
use credit_core::types::{ensure_finite, SolverError};
use num_traits::Float;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};
use terms::check_bracket;

/// Constant-hazard CDS calculator.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
/// * `C` - Discount curve, `dyn DiscountCurve<T>` unless a concrete curve
///   type is named
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use credit_core::market_data::FlatRateCurve;
/// use credit_pricer::{SpreadCalculator, SpreadUnit};
///
/// let curve = Rc::new(FlatRateCurve::new(0.01627_f64).unwrap());
/// let mut calculator = SpreadCalculator::cdx_hy(Rc::clone(&curve), 5.0, 10.0 / 365.0, None).unwrap();
///
/// let spread = calculator
///     .price_to_par_spread(100.0 - 106.8723, SpreadUnit::BasisPoints)
///     .unwrap();
/// assert!((spread - 338.99).abs() < 0.01);
///
/// // Re-rating the shared curve reprices without rebuilding
/// curve.update_rate(0.03).unwrap();
/// let repriced = calculator
///     .price_to_par_spread(100.0 - 106.8723, SpreadUnit::BasisPoints)
///     .unwrap();
/// assert!(repriced != spread);
/// ```
pub struct SpreadCalculator<T: Float, C: DiscountCurve<T> + ?Sized = dyn DiscountCurve<T>> {
    discount_curve: Rc<C>,
    terms: ContractTerms<T>,
    calibration: CalibrationConfig<T>,
    protection_leg: ProtectionLeg<T, C>,
    premium_leg: PremiumLeg<T, C>,
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> SpreadCalculator<T, C> {
    /// Create a calculator with both legs at zero hazard.
    ///
    /// # Errors
    ///
    /// [`CdsError::Parameter`] when `terms` fails [`ContractTerms::validate`].
    pub fn new(discount_curve: Rc<C>, terms: ContractTerms<T>) -> Result<Self, CdsError> {
        terms.validate()?;
        let protection_leg =
            ProtectionLeg::new(terms.notional, terms.recovery_rate, Rc::clone(&discount_curve))?;
        let premium_leg = PremiumLeg::new(
            terms.notional,
            terms.coupon,
            terms.coupon_frequency,
            Rc::clone(&discount_curve),
        )?;

        Ok(Self {
            discount_curve,
            terms,
            calibration: CalibrationConfig::default(),
            protection_leg,
            premium_leg,
        })
    }

    /// Calculator for a standard index series.
    pub fn for_index(
        index: IndexConvention,
        discount_curve: Rc<C>,
        tenor: T,
        series_rel_start: T,
        valuation_time: Option<T>,
    ) -> Result<Self, CdsError> {
        Self::new(
            discount_curve,
            index.terms(tenor, series_rel_start, valuation_time),
        )
    }

    /// CDX IG calculator (R = 40%, 100bp coupon).
    pub fn cdx_ig(
        discount_curve: Rc<C>,
        tenor: T,
        series_rel_start: T,
        valuation_time: Option<T>,
    ) -> Result<Self, CdsError> {
        Self::for_index(
            IndexConvention::CdxIg,
            discount_curve,
            tenor,
            series_rel_start,
            valuation_time,
        )
    }

    /// CDX HY calculator (R = 30%, 500bp coupon).
    pub fn cdx_hy(
        discount_curve: Rc<C>,
        tenor: T,
        series_rel_start: T,
        valuation_time: Option<T>,
    ) -> Result<Self, CdsError> {
        Self::for_index(
            IndexConvention::CdxHy,
            discount_curve,
            tenor,
            series_rel_start,
            valuation_time,
        )
    }

    /// iTraxx Europe calculator (R = 40%, 100bp coupon).
    pub fn itraxx_europe(
        discount_curve: Rc<C>,
        tenor: T,
        series_rel_start: T,
        valuation_time: Option<T>,
    ) -> Result<Self, CdsError> {
        Self::for_index(
            IndexConvention::ItraxxEurope,
            discount_curve,
            tenor,
            series_rel_start,
            valuation_time,
        )
    }

    /// Replace the calibration settings.
    pub fn with_calibration(mut self, calibration: CalibrationConfig<T>) -> Result<Self, CdsError> {
        self.set_calibration(calibration)?;
        Ok(self)
    }

    /// Replace the calibration settings in place.
    pub fn set_calibration(&mut self, calibration: CalibrationConfig<T>) -> Result<(), CdsError> {
        calibration.validate()?;
        self.calibration = calibration;
        Ok(())
    }

    // ========================================
    // Valuation
    // ========================================

    /// Set `lambda` on both legs.
    fn set_hazard_rate(&mut self, lambda: T) -> Result<(), CdsError> {
        self.protection_leg.update_lambda(lambda)?;
        self.premium_leg.update_lambda(lambda)?;
        Ok(())
    }

    fn leg_values(&self) -> Result<(T, T), CdsError> {
        let (start, end) = (self.terms.relative_start, self.terms.tenor);
        let valuation_time = self.terms.valuation_time;
        let protection_pv = self
            .protection_leg
            .present_value(start, end, valuation_time)?;
        let premium_pv = self.premium_leg.present_value(start, end, valuation_time)?;
        Ok((protection_pv, premium_pv))
    }

    /// Upfront paid by the protection buyer at hazard rate `lambda`.
    ///
    /// Leaves both legs at `lambda`.
    pub fn evaluate_upfront(&mut self, lambda: T) -> Result<T, CdsError> {
        self.set_hazard_rate(lambda)?;
        let (protection_pv, premium_pv) = self.leg_values()?;
        let upfront = protection_pv - premium_pv;

        debug!(
            hazard_rate = to_f64(lambda),
            protection_pv = to_f64(protection_pv),
            premium_pv = to_f64(premium_pv),
            upfront = to_f64(upfront),
            "Evaluated upfront"
        );
        Ok(upfront)
    }

    /// Leg values, upfront, par spread and risky PV01 at `lambda`.
    pub fn valuation(&mut self, lambda: T) -> Result<CdsValuation<T>, CdsError> {
        self.set_hazard_rate(lambda)?;
        let (protection_pv, premium_pv) = self.leg_values()?;
        Ok(CdsValuation::new(
            lambda,
            protection_pv,
            premium_pv,
            self.terms.coupon,
        ))
    }

    /// Fair running spread at hazard rate `lambda`.
    ///
    /// ```text
    /// s = c · PV_protection(λ) / PV_premium(λ)
    /// ```
    pub fn calculate_par_spread(&mut self, lambda: T, unit: SpreadUnit) -> Result<T, CdsError> {
        let valuation = self.valuation(lambda)?;
        debug!(
            hazard_rate = to_f64(lambda),
            par_spread_bps = to_f64(valuation.par_spread_in(SpreadUnit::BasisPoints)),
            "Computed par spread"
        );
        Ok(valuation.par_spread_in(unit))
    }

    // ========================================
    // Calibration
    // ========================================

    /// Hazard rate reproducing `price`, searched over the configured bracket.
    pub fn calculate_hazard(&mut self, price: T) -> Result<T, CdsError> {
        let CalibrationConfig {
            min_guess,
            max_guess,
            ..
        } = self.calibration;
        self.calculate_hazard_in(price, min_guess, max_guess)
    }

    /// Hazard rate reproducing `price`, searched over `[min_guess, max_guess]`.
    ///
    /// On success both legs are left at the calibrated rate.
    ///
    /// # Errors
    ///
    /// - [`CalibrationError::InvalidBracket`]: bracket reversed, negative or not finite
    /// - [`CalibrationError::NotBracketed`]: the root lies outside the bracket
    /// - [`CalibrationError::NotConverged`]: iteration budget exhausted
    /// - [`CalibrationError::NumericalInstability`]: non-finite upfront
    pub fn calculate_hazard_in(
        &mut self,
        price: T,
        min_guess: T,
        max_guess: T,
    ) -> Result<T, CdsError> {
        let price = ensure_finite("price", price)?;
        check_bracket(min_guess, max_guess)?;

        let solver = BrentSolver::new(self.calibration.solver);
        let outcome = solver.try_find_root(
            |lambda| self.evaluate_upfront(lambda).map(|upfront| upfront - price),
            min_guess,
            max_guess,
        );

        match outcome {
            Ok(lambda) => {
                self.set_hazard_rate(lambda)?;
                debug!(
                    price = to_f64(price),
                    hazard_rate = to_f64(lambda),
                    "Calibrated hazard rate"
                );
                Ok(lambda)
            }
            Err(err) => {
                let err = calibration_failure(err, price, min_guess, max_guess);
                warn!(
                    price = to_f64(price),
                    min_guess = to_f64(min_guess),
                    max_guess = to_f64(max_guess),
                    error = %err,
                    "Hazard calibration failed"
                );
                Err(err)
            }
        }
    }

    /// Calibrate to `price` and return the par spread at the solved rate.
    pub fn price_to_par_spread(&mut self, price: T, unit: SpreadUnit) -> Result<T, CdsError> {
        let lambda = self.calculate_hazard(price)?;
        self.calculate_par_spread(lambda, unit)
    }

    /// [`price_to_par_spread`](Self::price_to_par_spread) over an explicit bracket.
    pub fn price_to_par_spread_in(
        &mut self,
        price: T,
        min_guess: T,
        max_guess: T,
        unit: SpreadUnit,
    ) -> Result<T, CdsError> {
        let lambda = self.calculate_hazard_in(price, min_guess, max_guess)?;
        self.calculate_par_spread(lambda, unit)
    }

    // ========================================
    // Mutators
    // ========================================

    /// Validate candidate terms before committing them.
    fn stage(&self, update: impl FnOnce(&mut ContractTerms<T>)) -> Result<ContractTerms<T>, CdsError> {
        let mut terms = self.terms;
        update(&mut terms);
        terms.validate()?;
        Ok(terms)
    }

    /// Set the notional on both legs.
    pub fn update_notional(&mut self, notional: T) -> Result<(), CdsError> {
        let terms = self.stage(|t| t.notional = notional)?;
        self.protection_leg.update_notional(notional)?;
        self.premium_leg.update_notional(notional)?;
        self.terms = terms;
        Ok(())
    }

    /// Point the calculator and both legs at another discount curve.
    pub fn update_discount_curve(&mut self, discount_curve: Rc<C>) {
        self.protection_leg
            .update_discount_curve(Rc::clone(&discount_curve));
        self.premium_leg
            .update_discount_curve(Rc::clone(&discount_curve));
        self.discount_curve = discount_curve;
    }

    /// Set the recovery rate on the protection leg.
    pub fn update_recovery_rate(&mut self, recovery_rate: T) -> Result<(), CdsError> {
        let terms = self.stage(|t| t.recovery_rate = recovery_rate)?;
        self.protection_leg.update_recovery_rate(recovery_rate)?;
        self.terms = terms;
        Ok(())
    }

    /// Set the running coupon on the premium leg.
    pub fn update_coupon(&mut self, coupon: T) -> Result<(), CdsError> {
        let terms = self.stage(|t| t.coupon = coupon)?;
        self.premium_leg.update_coupon(coupon)?;
        self.terms = terms;
        Ok(())
    }

    /// Set the coupon frequency on the premium leg.
    pub fn update_coupon_frequency(&mut self, coupon_frequency: T) -> Result<(), CdsError> {
        let terms = self.stage(|t| t.coupon_frequency = coupon_frequency)?;
        self.premium_leg.update_coupon_frequency(coupon_frequency)?;
        self.terms = terms;
        Ok(())
    }

    /// Set the start of the risk period.
    pub fn update_cds_relative_start_time(&mut self, relative_start: T) -> Result<(), CdsError> {
        self.terms = self.stage(|t| t.relative_start = relative_start)?;
        Ok(())
    }

    /// Set or clear the valuation time.
    pub fn update_valuation_time(&mut self, valuation_time: Option<T>) -> Result<(), CdsError> {
        self.terms = self.stage(|t| t.valuation_time = valuation_time)?;
        Ok(())
    }

    /// Set the maturity of the risk period.
    pub fn update_tenor(&mut self, tenor: T) -> Result<(), CdsError> {
        self.terms = self.stage(|t| t.tenor = tenor)?;
        Ok(())
    }

    /// Enable or disable the premium accrued at default.
    pub fn set_accrual_adjustment(&mut self, enabled: bool) {
        self.premium_leg.set_accrual_adjustment(enabled);
    }

    // ========================================
    // Accessors
    // ========================================

    /// Contract terms.
    #[inline]
    pub fn terms(&self) -> &ContractTerms<T> {
        &self.terms
    }

    /// Calibration settings.
    #[inline]
    pub fn calibration(&self) -> &CalibrationConfig<T> {
        &self.calibration
    }

    /// Maturity of the risk period.
    #[inline]
    pub fn tenor(&self) -> T {
        self.terms.tenor
    }

    /// Contract notional.
    #[inline]
    pub fn notional(&self) -> T {
        self.terms.notional
    }

    /// Recovery rate.
    #[inline]
    pub fn recovery_rate(&self) -> T {
        self.terms.recovery_rate
    }

    /// Running coupon.
    #[inline]
    pub fn coupon(&self) -> T {
        self.terms.coupon
    }

    /// Coupon payments per year.
    #[inline]
    pub fn coupon_frequency(&self) -> T {
        self.terms.coupon_frequency
    }

    /// Start of the risk period.
    #[inline]
    pub fn cds_relative_start_time(&self) -> T {
        self.terms.relative_start
    }

    /// Valuation time, if any.
    #[inline]
    pub fn valuation_time(&self) -> Option<T> {
        self.terms.valuation_time
    }

    /// Whether the premium leg includes the accrual adjustment.
    #[inline]
    pub fn accrual_adjustment(&self) -> bool {
        self.premium_leg.accrual_adjustment()
    }

    /// Hazard rate currently set on both legs.
    #[inline]
    pub fn hazard_rate(&self) -> T {
        self.protection_leg.hazard().hazard_rate()
    }

    /// Shared discount curve.
    #[inline]
    pub fn discount_curve(&self) -> &Rc<C> {
        &self.discount_curve
    }

    /// Protection leg.
    #[inline]
    pub fn protection_leg(&self) -> &ProtectionLeg<T, C> {
        &self.protection_leg
    }

    /// Premium leg.
    #[inline]
    pub fn premium_leg(&self) -> &PremiumLeg<T, C> {
        &self.premium_leg
    }
}

/// Translate a root-finder failure into the calibration taxonomy.
fn calibration_failure<T: Float>(
    err: RootError<CdsError>,
    price: T,
    min_guess: T,
    max_guess: T,
) -> CdsError {
    let price = to_f64(price);
    match err {
        RootError::Objective(err) => err,
        RootError::Solver(SolverError::NoBracket { .. }) => CalibrationError::NotBracketed {
            price,
            min_guess: to_f64(min_guess),
            max_guess: to_f64(max_guess),
        }
        .into(),
        RootError::Solver(SolverError::MaxIterationsExceeded { iterations }) => {
            CalibrationError::NotConverged { price, iterations }.into()
        }
        RootError::Solver(SolverError::NumericalInstability(message)) => {
            CalibrationError::NumericalInstability { price, message }.into()
        }
    }
}

impl<T: Float, C: DiscountCurve<T> + ?Sized> fmt::Debug for SpreadCalculator<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpreadCalculator")
            .field("tenor", &to_f64(self.terms.tenor))
            .field("relative_start", &to_f64(self.terms.relative_start))
            .field("valuation_time", &self.terms.valuation_time.map(to_f64))
            .field("protection_leg", &self.protection_leg)
            .field("premium_leg", &self.premium_leg)
            .finish_non_exhaustive()
    }
}
