//! Core types shared by every evaluator: errors, per-call configuration and
//! the Coulomb regime label.

use num_complex::Complex64;
use thiserror::Error;

use crate::machine::DEFAULT_TOL;

/// Error type for special function evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// Input outside the function's domain (negative order, pole, complex result for real input).
    #[error("domain error: {reason}")]
    Domain {
        /// Which constraint was violated.
        reason: &'static str,
    },
    /// Quadrature or series did not reach the tolerance within its budget.
    ///
    /// Carries the best estimate and its error bound so callers may still use them.
    #[error("convergence failure: estimate {estimate} with error bound {error_bound:e}")]
    ConvergenceFailure {
        /// Best estimate available when the budget ran out.
        estimate: Complex64,
        /// Absolute error bound of that estimate.
        error_bound: f64,
    },
    /// Series terms kept growing, or a parameter sits on a pole of the series.
    #[error("divergent series after {terms} terms")]
    DivergentSeries {
        /// Number of terms summed before giving up.
        terms: usize,
    },
}

impl Error {
    pub(crate) fn domain(reason: &'static str) -> Self {
        Error::Domain { reason }
    }

    /// A numeric shortfall another representation may still overcome.
    pub(crate) fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::ConvergenceFailure { .. } | Error::DivergentSeries { .. }
        )
    }
}

/// Per-call numerical configuration.
///
/// `Config` is `Copy` and threaded by reference through every kernel, so
/// concurrent calls with different tolerances never interfere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Relative accuracy target.
    pub tol: f64,
    /// Quadrature refinement budget (panel bisections beyond the initial partition).
    pub max_bisections: usize,
    /// Largest initial partition a quadrature may start from.
    pub max_panels: usize,
    /// Series term cap.
    pub max_terms: usize,
    /// Consecutive growing terms tolerated before a series is declared divergent.
    pub max_growth_run: usize,
    /// Verify the Coulomb cross relation after an exact evaluation.
    pub check_wronskian: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tol: DEFAULT_TOL,
            max_bisections: 1000,
            max_panels: 10_000,
            max_terms: 10_000,
            max_growth_run: 2_000,
            check_wronskian: false,
        }
    }
}

impl Config {
    /// Replace the tolerance.
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Enable or disable the Coulomb cross-relation check.
    pub fn with_wronskian_check(mut self, on: bool) -> Self {
        self.check_wronskian = on;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if !(self.tol.is_finite() && self.tol > 0.0) {
            return Err(Error::domain("tolerance must be finite and positive"));
        }
        Ok(())
    }
}

/// Argument regime chosen by the Coulomb dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// ρ small enough that the leading power-law term meets the tolerance.
    SmallArgument,
    /// Integral representations evaluated by quadrature.
    Exact,
    /// ρ large enough for the asymptotic expansion in 1/ρ.
    LargeArgument,
}
