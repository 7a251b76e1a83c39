//! Machine constants and tolerance floors for IEEE double precision.

/// Machine epsilon for `f64`.
pub const MACH_EPSILON: f64 = f64::EPSILON;

/// Default relative tolerance.
pub const DEFAULT_TOL: f64 = 1e-15;

/// Smallest tolerance the kernels will chase; tighter requests are clamped.
pub const MIN_TOL: f64 = 2.0 * MACH_EPSILON;

/// Roundoff floor for quadrature, relative to `∫|f|`.
pub const ROUNDOFF_FLOOR: f64 = 50.0 * MACH_EPSILON;

/// Cancellation ratio (largest term or `∫|f|` over the result) accepted at
/// the tightest tolerance; about four digits.
pub const CANCELLATION_LIMIT: f64 = 1e4;

/// Working tolerance: the request clamped to the machine floor.
#[inline]
pub(crate) fn working_tol(tol: f64) -> f64 {
    tol.max(MIN_TOL)
}

/// Largest cancellation ratio a representation may show before its result
/// is rejected. Looser tolerances accept proportionally more.
#[inline]
pub(crate) fn loss_limit(tol: f64) -> f64 {
    CANCELLATION_LIMIT.max(working_tol(tol) / MACH_EPSILON)
}
