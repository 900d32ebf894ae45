//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;
use std::convert::Infallible;

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to
/// converge for continuous functions with a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Algorithm
///
/// Brent's method switches between:
/// - **Bisection**: Guaranteed progress, slower convergence
/// - **Secant method**: Faster convergence using linear approximation
/// - **Inverse quadratic interpolation**: Even faster when applicable
///
/// The method falls back to bisection when the interpolated step would
/// leave the bracket or shrink it too slowly.
///
/// # Example
///
/// ```
/// use credit_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x³ - x - 2 = 0 in bracket [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid bracket).
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance` or the bracket has collapsed
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have same sign
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::NumericalInstability)` - `f` returned NaN or infinity
    ///
    /// # Example
    ///
    /// ```
    /// use credit_core::math::solvers::{BrentSolver, SolverConfig};
    ///
    /// let solver = BrentSolver::new(SolverConfig::default());
    ///
    /// // Solve x² - 2 = 0 in bracket [0, 2]
    /// let f = |x: f64| x * x - 2.0;
    ///
    /// let root = solver.find_root(f, 0.0, 2.0).unwrap();
    /// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    /// ```
    pub fn find_root<F>(&self, mut f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: FnMut(T) -> T,
    {
        self.try_find_root(|x| Ok::<T, Infallible>(f(x)), a, b)
            .map_err(|err| match err {
                RootError::Solver(e) => e,
                RootError::Objective(never) => match never {},
            })
    }

    /// Find a root of a fallible objective in the bracket [a, b].
    ///
    /// The first error returned by `f` aborts the search and is handed back
    /// unchanged as [`RootError::Objective`]; solver failures come back as
    /// [`RootError::Solver`].
    ///
    /// # Example
    ///
    /// ```
    /// use credit_core::math::solvers::{BrentSolver, RootError};
    ///
    /// let solver: BrentSolver<f64> = BrentSolver::with_defaults();
    ///
    /// let f = |x: f64| if x > 1.5 { Err("out of domain") } else { Ok(x - 1.0) };
    /// let root = solver.try_find_root(f, 0.0, 1.2).unwrap();
    /// assert!((root - 1.0).abs() < 1e-10);
    ///
    /// let err = solver.try_find_root(f, 0.0, 2.0).unwrap_err();
    /// assert!(matches!(err, RootError::Objective("out of domain")));
    /// ```
    pub fn try_find_root<F, E>(&self, mut f: F, a: T, b: T) -> Result<T, RootError<E>>
    where
        F: FnMut(T) -> Result<T, E>,
    {
        let mut eval = |x: T| -> Result<T, RootError<E>> {
            let fx = f(x).map_err(RootError::Objective)?;
            if fx.is_finite() {
                Ok(fx)
            } else {
                Err(RootError::Solver(SolverError::NumericalInstability(
                    format!(
                        "objective returned {} at x = {}",
                        fx.to_f64().unwrap_or(f64::NAN),
                        x.to_f64().unwrap_or(f64::NAN)
                    ),
                )))
            }
        };

        let mut a = a;
        let mut b = b;
        let mut fa = eval(a)?;
        let mut fb = eval(b)?;

        // Check for valid bracket
        if fa * fb > T::zero() {
            return Err(RootError::Solver(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            }));
        }

        let one = T::one();
        let two = one + one;
        let three = two + one;
        let half = one / two;
        let tol = self.config.tolerance;

        // b is the best estimate, c the contrapoint with f(c) of opposite sign
        let mut c = b;
        let mut fc = fb;
        let mut d = b - a;
        let mut e = d;

        for _iteration in 0..self.config.max_iterations {
            if (fb > T::zero() && fc > T::zero()) || (fb < T::zero() && fc < T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // Ensure |f(c)| >= |f(b)|
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol1 = two * T::epsilon() * b.abs() + half * tol;
            let m = half * (c - b);

            if fb.abs() < tol || m.abs() <= tol1 {
                return Ok(b);
            }

            if e.abs() >= tol1 && fa.abs() > fb.abs() {
                let s = fb / fa;
                let mut p;
                let mut q;

                if a == c {
                    // Secant method
                    p = two * m * s;
                    q = one - s;
                } else {
                    // Inverse quadratic interpolation
                    let r = fb / fc;
                    let t = fa / fc;
                    p = s * (two * m * t * (t - r) - (b - a) * (r - one));
                    q = (t - one) * (r - one) * (s - one);
                }

                // Orient the step towards the contrapoint
                if p > T::zero() {
                    q = -q;
                }
                p = p.abs();

                let min1 = three * m * q - (tol1 * q).abs();
                let min2 = (e * q).abs();
                if two * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = m;
                    e = m;
                }
            } else {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;

            if d.abs() > tol1 {
                b = b + d;
            } else {
                // Minimum step
                b = b + if m > T::zero() { tol1 } else { -tol1 };
            }

            fb = eval(b)?;
        }

        Err(RootError::Solver(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        }))
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

/// Failure of [`BrentSolver::try_find_root`].
#[derive(Debug, Clone, PartialEq)]
pub enum RootError<E> {
    /// The search itself failed (no bracket, no convergence, non-finite value).
    Solver(SolverError),
    /// The objective function returned an error.
    Objective(E),
}

impl<E> From<SolverError> for RootError<E> {
    fn from(err: SolverError) -> Self {
        RootError::Solver(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Basic Root Finding Tests
    // ========================================

    #[test]
    fn test_find_sqrt_2() {
        let solver = BrentSolver::new(SolverConfig::default());

        let f = |x: f64| x * x - 2.0;

        let root = solver.find_root(f, 0.0, 2.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_find_cubic_root() {
        let solver = BrentSolver::new(SolverConfig::default());

        // x³ - x - 2 = 0, root near 1.52
        let f = |x: f64| x * x * x - x - 2.0;

        let root = solver.find_root(f, 1.0, 2.0).unwrap();
        assert!(f(root).abs() < 1e-10);
    }

    #[test]
    fn test_bracket_reversed() {
        let solver = BrentSolver::new(SolverConfig::default());

        let f = |x: f64| x * x - 2.0;

        let root = solver.find_root(f, 2.0, 0.0).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
    }

    #[test]
    fn test_decreasing_exponential() {
        let solver = BrentSolver::new(SolverConfig::default());

        // Shape of an upfront curve in the hazard rate: strictly decreasing
        let f = |x: f64| (-5.0 * x).exp() - 0.5;

        let root = solver.find_root(f, 1e-5, 1.0).unwrap();
        assert!((root - 2.0_f64.ln() / 5.0).abs() < 1e-10);
    }

    // ========================================
    // Error Handling Tests
    // ========================================

    #[test]
    fn test_no_bracket_same_sign_positive() {
        let solver = BrentSolver::new(SolverConfig::default());

        // f(1) = 1 > 0, f(2) = 4 > 0 - no sign change
        let f = |x: f64| x * x;

        match solver.find_root(f, 1.0, 2.0).unwrap_err() {
            SolverError::NoBracket { a, b } => {
                assert!((a - 1.0).abs() < 1e-10);
                assert!((b - 2.0).abs() < 1e-10);
            }
            other => panic!("Expected NoBracket error, got {:?}", other),
        }
    }

    #[test]
    fn test_root_at_bracket_endpoint() {
        let solver = BrentSolver::new(SolverConfig::default());

        let f = |x: f64| x - 1.0;

        let root = solver.find_root(f, 0.0, 1.0).unwrap();
        assert!((root - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let config = SolverConfig::new(1e-100, 3); // Impossible tolerance
        let solver = BrentSolver::new(config);

        let f = |x: f64| x * x - 2.0;

        match solver.find_root(f, 0.0, 2.0).unwrap_err() {
            SolverError::MaxIterationsExceeded { iterations } => {
                assert_eq!(iterations, 3);
            }
            other => panic!("Expected MaxIterationsExceeded error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_objective() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();

        let f = |x: f64| if x > 0.5 { f64::NAN } else { x - 1.0 };

        let result = solver.find_root(f, 0.0, 2.0);
        assert!(matches!(
            result,
            Err(SolverError::NumericalInstability(_))
        ));
    }

    // ========================================
    // Fallible Objective Tests
    // ========================================

    #[test]
    fn test_try_find_root_ok() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();

        let f = |x: f64| Ok::<f64, String>(x - x.cos());

        let root = solver.try_find_root(f, 0.0, 1.0).unwrap();
        assert!((root - root.cos()).abs() < 1e-10);
    }

    #[test]
    fn test_try_find_root_propagates_objective_error() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();

        let mut calls = 0;
        let f = |x: f64| {
            calls += 1;
            if calls > 3 {
                Err("curve unavailable")
            } else {
                Ok(x * x - 2.0)
            }
        };

        let err = solver.try_find_root(f, 0.0, 2.0).unwrap_err();
        assert_eq!(err, RootError::Objective("curve unavailable"));
    }

    #[test]
    fn test_try_find_root_reports_solver_error() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();

        let f = |x: f64| Ok::<f64, String>(x * x + 1.0);

        let err = solver.try_find_root(f, -1.0, 1.0).unwrap_err();
        assert!(matches!(
            err,
            RootError::Solver(SolverError::NoBracket { .. })
        ));
    }

    #[test]
    fn test_objective_may_mutate_state() {
        let solver: BrentSolver<f64> = BrentSolver::with_defaults();

        let mut evaluations = Vec::new();
        let root = solver
            .find_root(
                |x| {
                    evaluations.push(x);
                    x - 0.25
                },
                0.0,
                1.0,
            )
            .unwrap();

        assert!((root - 0.25).abs() < 1e-10);
        assert!(evaluations.len() >= 2);
    }

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_achieves_tolerance() {
        let tol = 1e-12;
        let solver = BrentSolver::new(SolverConfig::new(tol, 100));

        let f = |x: f64| x * x - 2.0;

        let root = solver.find_root(f, 0.0, 2.0).unwrap();
        assert!(f(root).abs() < tol);
    }

    #[test]
    fn test_config_accessor() {
        let solver = BrentSolver::new(SolverConfig::new(1e-8, 50));

        assert!((solver.config().tolerance - 1e-8).abs() < 1e-15);
        assert_eq!(solver.config().max_iterations, 50);
    }
}
