//! Internal numeric kernels shared by the evaluators.
//!
//! All items are `pub(crate)`; they are not part of the public API.
//!
//! - [`quad`]: adaptive Gauss–Kronrod quadrature over finite, partitioned and
//!   semi-infinite ranges.
//! - [`series`]: recurrence-driven series and asymptotic-expansion summation.
//! - [`constants`]: π multiples and the Stirling/Bernoulli coefficient table.
//!
//! Kernels never pick a representation. They report how well they did
//! (`Estimate::error`, `SeriesSum::max_term`, `AsymptoticSum::bound`) and the
//! evaluator decides whether to fall back.

pub(crate) mod constants;
pub(crate) mod quad;
pub(crate) mod series;
