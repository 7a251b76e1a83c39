//! Series and asymptotic-expansion summation.
//!
//! Terms are produced by a recurrence from the previous term so that no
//! factorial or Pochhammer symbol is ever formed from scratch.

use num_complex::Complex64;

use crate::machine::working_tol;
use crate::types::{Config, Error};

/// Consecutive negligible terms required before a convergent series stops.
pub(crate) const STALL_RUN: usize = 3;

/// Result of a convergent series.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SeriesSum {
    pub value: Complex64,
    /// Largest term magnitude seen; `max_term / |value|` measures cancellation.
    pub max_term: f64,
    pub terms: usize,
}

/// Result of an asymptotic expansion truncated at its smallest term.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AsymptoticSum {
    pub value: Complex64,
    /// Magnitude of the first omitted term (or the last one added).
    pub bound: f64,
    /// `true` when the tolerance was met before the terms began to grow.
    pub converged: bool,
}

/// Neumaier-compensated complex accumulator.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: Complex64,
    comp: Complex64,
}

impl Accumulator {
    fn add(&mut self, x: Complex64) {
        self.sum = Complex64::new(
            two_sum(self.sum.re, x.re, &mut self.comp.re),
            two_sum(self.sum.im, x.im, &mut self.comp.im),
        );
    }

    fn value(&self) -> Complex64 {
        self.sum + self.comp
    }
}

#[inline]
fn two_sum(s: f64, x: f64, comp: &mut f64) -> f64 {
    let t = s + x;
    if s.abs() >= x.abs() {
        *comp += (s - t) + x;
    } else {
        *comp += (x - t) + s;
    }
    t
}

/// Sum `first + Σ_{k≥1} term_k`, where `term_k = next(k, term_{k-1})`.
///
/// Stops once `STALL_RUN` consecutive terms satisfy `|term| ≤ tol·|sum|`.
/// A zero term with a zero-returning recurrence (terminating polynomial)
/// stops immediately.
pub(crate) fn sum_series<F>(first: Complex64, mut next: F, cfg: &Config) -> Result<SeriesSum, Error>
where
    F: FnMut(usize, Complex64) -> Complex64,
{
    let tol = working_tol(cfg.tol);
    let mut acc = Accumulator::default();
    acc.add(first);

    let mut term = first;
    let mut max_term = first.norm();
    let mut small_run = 0usize;
    let mut growth_run = 0usize;

    for k in 1..=cfg.max_terms {
        let prev_mag = term.norm();
        term = next(k, term);
        let mag = term.norm();

        if term == Complex64::new(0.0, 0.0) && prev_mag == 0.0 {
            return Ok(SeriesSum {
                value: acc.value(),
                max_term,
                terms: k,
            });
        }

        acc.add(term);
        let sum = acc.value();
        if !sum.re.is_finite() || !sum.im.is_finite() || !mag.is_finite() {
            log::debug!("series overflowed after {k} terms");
            return Err(Error::DivergentSeries { terms: k });
        }
        max_term = max_term.max(mag);

        if mag > prev_mag {
            growth_run += 1;
            if growth_run > cfg.max_growth_run {
                log::debug!("series terms grew for {growth_run} consecutive steps");
                return Err(Error::DivergentSeries { terms: k });
            }
        } else {
            growth_run = 0;
        }

        if mag <= tol * sum.norm() {
            small_run += 1;
            if small_run >= STALL_RUN {
                log::trace!("series converged after {k} terms");
                return Ok(SeriesSum {
                    value: sum,
                    max_term,
                    terms: k,
                });
            }
        } else {
            small_run = 0;
        }
    }

    Err(Error::ConvergenceFailure {
        estimate: acc.value(),
        error_bound: term.norm(),
    })
}

/// Sum an asymptotic expansion `first + Σ term_k` while its terms decrease.
///
/// Stops at `|term| ≤ tol·|sum|` or right before the first growing term.
/// Validity of the expansion is the caller's business; `bound` tells it
/// how good the truncation was.
pub(crate) fn sum_asymptotic<F>(first: Complex64, mut next: F, cfg: &Config) -> AsymptoticSum
where
    F: FnMut(usize, Complex64) -> Complex64,
{
    let tol = working_tol(cfg.tol);
    let mut acc = Accumulator::default();
    acc.add(first);

    let mut term = first;
    let mut prev_mag = first.norm();

    for k in 1..=cfg.max_terms {
        term = next(k, term);
        let mag = term.norm();
        if mag == 0.0 {
            return AsymptoticSum {
                value: acc.value(),
                bound: 0.0,
                converged: true,
            };
        }
        if !mag.is_finite() || mag > prev_mag {
            return AsymptoticSum {
                value: acc.value(),
                bound: prev_mag,
                converged: false,
            };
        }
        acc.add(term);
        if mag <= tol * acc.value().norm() {
            return AsymptoticSum {
                value: acc.value(),
                bound: mag,
                converged: true,
            };
        }
        prev_mag = mag;
    }

    AsymptoticSum {
        value: acc.value(),
        bound: prev_mag,
        converged: false,
    }
}

impl AsymptoticSum {
    /// Relative truncation error meets `tol`.
    pub(crate) fn meets(&self, tol: f64) -> bool {
        self.converged || self.bound <= working_tol(tol) * self.value.norm()
    }
}
