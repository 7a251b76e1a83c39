//! Coulomb wave functions F_ℓ(η, ρ), G_ℓ(η, ρ) and H±_ℓ = G_ℓ ± i F_ℓ.
//!
//! Every call classifies `(ℓ, η, ρ)` into a [`Regime`]:
//!
//! - [`Regime::SmallArgument`]: leading power-law terms `C_ℓ ρ^{ℓ+1}` and
//!   `ρ^{-ℓ}/((2ℓ+1) C_ℓ)`.
//! - [`Regime::LargeArgument`]: asymptotic expansion of `H⁺` in `1/ρ`, falling
//!   back to the exact branch when its truncation bound misses the tolerance.
//! - [`Regime::Exact`]: integral representations by quadrature.
//!
//! In the exact branch `F` comes from
//!
//! ```text
//! F = e^{-πη/2} ρ^{ℓ+1} / (2^ℓ |Γ(ℓ+1+iη)|) ∫₀^∞ sech^{2ℓ+2}(w) cos(ρ tanh w - 2ηw) dw
//! ```
//!
//! and `H⁺` from the rotated contour
//!
//! ```text
//! H⁺ = (2ρ)^{-ℓ} e^{πη/2} e^{iρ} / |Γ(ℓ+1+iη)| ∫₀^∞ e^{-u} u^{ℓ+iη} (u - 2iρ)^{ℓ-iη} du
//! ```
//!
//! Every representation reports its cancellation ratio. Whichever loses
//! fewest digits supplies each of `F` and `G`. When both integrals cancel,
//! two more are tried:
//!
//! - the power series of `F`, exact inside the barrier (`η > 0`, small ρ);
//! - Steed's method, pairing the continued fractions for `F'/F` and
//!   `H⁺'/H⁺` through the Wronskian. It holds up deep in attractive fields.
//!
//! When every route still loses more than the tolerance allows, the call
//! fails with [`Error::ConvergenceFailure`] instead of returning noise.

use core::f64::consts::{FRAC_PI_2, LN_2, PI};

use num_complex::Complex64;

use crate::algo::quad::{Estimate, Quadrature};
use crate::algo::series::{sum_asymptotic, sum_series};
use crate::gamma::{ln_gamma, ln_gamma_real};
use crate::machine::{loss_limit, working_tol, MACH_EPSILON, MIN_TOL};
use crate::types::{Config, Error, Regime};

/// Split between the partitioned head and the semi-infinite tail of the F integral.
const SECH_SPLIT: f64 = 3.0;

/// Lentz's guard against a zero denominator in the ℓ continued fraction.
const LENTZ_TINY: f64 = 1e-300;

fn check_arguments(eta: f64, rho: f64) -> Result<(), Error> {
    if !eta.is_finite() {
        return Err(Error::domain("Coulomb eta must be finite"));
    }
    if !rho.is_finite() || rho < 0.0 {
        return Err(Error::domain("Coulomb rho must be finite and non-negative"));
    }
    Ok(())
}

#[inline]
fn ln_gamma_eta(ell: u32, eta: f64) -> Result<Complex64, Error> {
    ln_gamma(Complex64::new(f64::from(ell) + 1.0, eta))
}

// ── constants and closed forms ──

fn ln_normalization(ell: u32, eta: f64) -> f64 {
    let l = f64::from(ell);
    let (Ok(lg), Ok(lg2)) = (ln_gamma_eta(ell, eta), ln_gamma_real(2.0 * l + 2.0)) else {
        return f64::NAN;
    };
    l * LN_2 - FRAC_PI_2 * eta + lg.re - lg2
}

/// Normalization C_ℓ(η) = 2^ℓ e^{-πη/2} |Γ(ℓ+1+iη)| / (2ℓ+1)!.
///
/// Formed in log space, so it underflows gracefully for large positive η.
pub fn coulomb_normalization(ell: u32, eta: f64) -> f64 {
    ln_normalization(ell, eta).exp()
}

/// Coulomb phase shift σ_ℓ(η) = arg Γ(ℓ+1+iη), continuous in η.
pub fn coulomb_phase_shift(ell: u32, eta: f64) -> f64 {
    ln_gamma_eta(ell, eta).map_or(f64::NAN, |lg| lg.im)
}

/// θ_ℓ = ρ - η ln 2ρ - ℓπ/2 + σ_ℓ(η).
pub fn coulomb_phase(ell: u32, eta: f64, rho: f64) -> f64 {
    rho - eta * (2.0 * rho).ln() - f64::from(ell) * FRAC_PI_2 + coulomb_phase_shift(ell, eta)
}

/// Small-ρ form of the regular function, `C_ℓ ρ^{ℓ+1}`.
pub fn regular_coulomb_approx(ell: u32, eta: f64, rho: f64) -> f64 {
    (ln_normalization(ell, eta) + (f64::from(ell) + 1.0) * rho.ln()).exp()
}

/// Small-ρ form of the irregular function, `ρ^{-ℓ} / ((2ℓ+1) C_ℓ)`.
pub fn irregular_coulomb_approx(ell: u32, eta: f64, rho: f64) -> f64 {
    let l = f64::from(ell);
    let ln_power = if ell == 0 { 0.0 } else { -l * rho.ln() };
    (ln_power - ln_normalization(ell, eta)).exp() / (2.0 * l + 1.0)
}

/// Large-ρ form of the regular function, `sin θ_ℓ`.
pub fn regular_coulomb_limit(ell: u32, eta: f64, rho: f64) -> f64 {
    coulomb_phase(ell, eta, rho).sin()
}

/// Large-ρ form of the irregular function, `cos θ_ℓ`.
pub fn irregular_coulomb_limit(ell: u32, eta: f64, rho: f64) -> f64 {
    coulomb_phase(ell, eta, rho).cos()
}

/// Cross relation `F_{ℓ-1} G_ℓ - F_ℓ G_{ℓ-1} = ℓ / √(ℓ² + η²)`.
///
/// The relation starts at ℓ = 1; ℓ = 0 yields 0.
pub fn coulomb_cross(ell: u32, eta: f64) -> f64 {
    if ell == 0 {
        return 0.0;
    }
    let l = f64::from(ell);
    l / l.hypot(eta)
}

// ── regime selection ──

/// Pick the evaluation regime for `(ℓ, η, ρ)` at relative tolerance `tol`.
pub fn classify(ell: u32, eta: f64, rho: f64, tol: f64) -> Regime {
    let tol = working_tol(tol);
    if rho == 0.0 {
        return Regime::SmallArgument;
    }
    let l = f64::from(ell);
    let correction =
        rho * (eta.abs() * (2.0 + (2.0 * rho).ln().abs() + eta.abs().ln_1p()) + rho);
    if correction <= tol {
        return Regime::SmallArgument;
    }
    let onset = (0.5 * tol.recip().ln() + 10.0).max(l * (l + 1.0) + eta * eta)
        + 2.0 * eta.abs()
        + l;
    if rho >= onset {
        Regime::LargeArgument
    } else {
        Regime::Exact
    }
}

/// `(F_ℓ, G_ℓ)` from a forced regime.
///
/// # Errors
///
/// [`Error::ConvergenceFailure`] when the large-argument expansion cannot
/// meet the tolerance at this ρ; no fallback is attempted.
pub fn coulomb_in_regime(
    regime: Regime,
    ell: u32,
    eta: f64,
    rho: f64,
    cfg: &Config,
) -> Result<(f64, f64), Error> {
    cfg.validate()?;
    check_arguments(eta, rho)?;
    match regime {
        Regime::SmallArgument => Ok(small_argument(ell, eta, rho)),
        Regime::Exact => exact(ell, eta, rho, cfg),
        Regime::LargeArgument => {
            let (h, bound) = large_argument(ell, eta, rho, cfg)?;
            if bound <= working_tol(cfg.tol) * h.norm() {
                Ok((h.im, h.re))
            } else {
                Err(Error::ConvergenceFailure {
                    estimate: h,
                    error_bound: bound,
                })
            }
        }
    }
}

// ── public evaluators ──

/// F_ℓ(η, ρ) with the default configuration.
pub fn regular_coulomb(ell: u32, eta: f64, rho: f64) -> Result<f64, Error> {
    regular_coulomb_with(ell, eta, rho, &Config::default())
}

/// Regular Coulomb wave function F_ℓ(η, ρ).
pub fn regular_coulomb_with(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<f64, Error> {
    coulomb_fg_with(ell, eta, rho, cfg).map(|(f, _)| f)
}

/// G_ℓ(η, ρ) with the default configuration.
pub fn irregular_coulomb(ell: u32, eta: f64, rho: f64) -> Result<f64, Error> {
    irregular_coulomb_with(ell, eta, rho, &Config::default())
}

/// Irregular Coulomb wave function G_ℓ(η, ρ).
pub fn irregular_coulomb_with(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<f64, Error> {
    coulomb_fg_with(ell, eta, rho, cfg).map(|(_, g)| g)
}

/// `(F_ℓ, G_ℓ)` with the default configuration.
pub fn coulomb_fg(ell: u32, eta: f64, rho: f64) -> Result<(f64, f64), Error> {
    coulomb_fg_with(ell, eta, rho, &Config::default())
}

/// Regular and irregular functions together; both come out of the same
/// regime decision.
///
/// # Errors
///
/// [`Error::Domain`] for negative or non-finite ρ and non-finite η.
/// [`Error::ConvergenceFailure`] when every exact representation cancels
/// beyond what `cfg.tol` allows (the estimate is `G + iF` from the least
/// damaged routes), or when `cfg.check_wronskian` is set and the cross
/// relation with ℓ - 1 fails.
pub fn coulomb_fg_with(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<(f64, f64), Error> {
    cfg.validate()?;
    check_arguments(eta, rho)?;
    match classify(ell, eta, rho, cfg.tol) {
        Regime::SmallArgument => Ok(small_argument(ell, eta, rho)),
        Regime::Exact => exact(ell, eta, rho, cfg),
        Regime::LargeArgument => {
            let (h, bound) = large_argument(ell, eta, rho, cfg)?;
            if bound <= working_tol(cfg.tol) * h.norm() {
                return Ok((h.im, h.re));
            }
            log::debug!(
                "coulomb(l = {ell}, eta = {eta}, rho = {rho}): asymptotic bound {bound:e} \
                 misses tolerance, integrating"
            );
            exact(ell, eta, rho, cfg)
        }
    }
}

/// H⁺_ℓ = G_ℓ + i F_ℓ with the default configuration.
pub fn coulomb_h_plus(ell: u32, eta: f64, rho: f64) -> Result<Complex64, Error> {
    coulomb_h_plus_with(ell, eta, rho, &Config::default())
}

/// Outgoing wave H⁺_ℓ = G_ℓ + i F_ℓ.
pub fn coulomb_h_plus_with(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<Complex64, Error> {
    let (f, g) = coulomb_fg_with(ell, eta, rho, cfg)?;
    Ok(Complex64::new(g, f))
}

/// H⁻_ℓ = G_ℓ - i F_ℓ with the default configuration.
pub fn coulomb_h_minus(ell: u32, eta: f64, rho: f64) -> Result<Complex64, Error> {
    coulomb_h_minus_with(ell, eta, rho, &Config::default())
}

/// Incoming wave H⁻_ℓ = G_ℓ - i F_ℓ.
pub fn coulomb_h_minus_with(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<Complex64, Error> {
    let (f, g) = coulomb_fg_with(ell, eta, rho, cfg)?;
    Ok(Complex64::new(g, -f))
}

// ── branches ──

fn small_argument(ell: u32, eta: f64, rho: f64) -> (f64, f64) {
    (
        regular_coulomb_approx(ell, eta, rho),
        irregular_coulomb_approx(ell, eta, rho),
    )
}

/// H⁺ ~ e^{iθ} Σ (ℓ+1+iη)ₖ (-ℓ+iη)ₖ / (k! (2iρ)ᵏ), with the truncation bound.
fn large_argument(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<(Complex64, f64), Error> {
    if rho == 0.0 {
        return Err(Error::domain("Coulomb asymptotic expansion needs rho > 0"));
    }
    let l = f64::from(ell);
    let theta = rho - eta * (2.0 * rho).ln() - l * FRAC_PI_2 + ln_gamma_eta(ell, eta)?.im;
    let a = Complex64::new(l + 1.0, eta);
    let b = Complex64::new(-l, eta);
    let two_i_rho = Complex64::new(0.0, 2.0 * rho);
    let sum = sum_asymptotic(
        Complex64::new(1.0, 0.0),
        |k, t| {
            let j = (k - 1) as f64;
            t * (a + j) * (b + j) / (two_i_rho * (j + 1.0))
        },
        cfg,
    );
    Ok((Complex64::from_polar(1.0, theta) * sum.value, sum.bound))
}

/// A value for `F` or `G` and the cancellation ratio of the representation
/// that produced it.
#[derive(Clone, Copy, Debug)]
struct Route {
    value: f64,
    loss: f64,
}

impl Route {
    const NONE: Route = Route {
        value: f64::NAN,
        loss: f64::INFINITY,
    };

    fn new(value: f64, loss: f64) -> Self {
        let loss = if value.is_finite() && !loss.is_nan() {
            loss
        } else {
            f64::INFINITY
        };
        Route { value, loss }
    }

    fn better(self, other: Route) -> Route {
        if other.loss < self.loss {
            other
        } else {
            self
        }
    }
}

/// Budget exhaustion in one representation leaves the others to try.
fn attempt<T>(what: &str, result: Result<T, Error>) -> Result<Option<T>, Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_recoverable() => {
            log::debug!("coulomb {what} gave up: {err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn exact(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Result<(f64, f64), Error> {
    let lg = ln_gamma_eta(ell, eta)?;
    let limit = loss_limit(cfg.tol);

    let (mut f, mut g) = (Route::NONE, Route::NONE);
    if let Some((h, h_loss)) = attempt("H+ integral", outgoing_integral(ell, eta, rho, lg, cfg))? {
        let amp = h.norm();
        g = Route::new(h.re, h_loss * amp / h.re.abs());
        f = Route::new(h.im, h_loss * amp / h.im.abs());
    }
    if f.loss > limit {
        if let Some((v, loss)) = attempt("F integral", regular_integral(ell, eta, rho, lg, cfg))? {
            f = f.better(Route::new(v, loss));
        }
    }
    if f.loss > limit {
        if let Some((v, loss)) = attempt("F series", regular_series(ell, eta, rho, lg, cfg))? {
            f = f.better(Route::new(v, loss));
        }
    }
    if f.loss > limit || g.loss > limit {
        if let Some((sf, sg)) = steed(ell, eta, rho, cfg) {
            f = f.better(sf);
            g = g.better(sg);
        }
    }

    if f.loss > limit || g.loss > limit {
        log::debug!(
            "coulomb(l = {ell}, eta = {eta}, rho = {rho}): cancellation {:e} in F, {:e} in G \
             exceeds {limit:e}",
            f.loss,
            g.loss
        );
        return Err(Error::ConvergenceFailure {
            estimate: Complex64::new(g.value, f.value),
            error_bound: MACH_EPSILON * (f.loss * f.value.abs()).max(g.loss * g.value.abs()),
        });
    }
    log::trace!("coulomb: cancellation {:e} in F, {:e} in G", f.loss, g.loss);

    if cfg.check_wronskian && ell >= 1 {
        check_cross(ell, eta, rho, f.value, g.value, cfg)?;
    }
    Ok((f.value, g.value))
}

/// F from the sech integral, and the integral's cancellation ratio.
fn regular_integral(
    ell: u32,
    eta: f64,
    rho: f64,
    lg: Complex64,
    cfg: &Config,
) -> Result<(f64, f64), Error> {
    let l = f64::from(ell);
    let ln_prefactor = -FRAC_PI_2 * eta + (l + 1.0) * rho.ln() - l * LN_2 - lg.re;
    let power = 2.0 * l + 2.0;
    let integrand = |w: f64| {
        let ln_sech = LN_2 - w - (-2.0 * w).exp().ln_1p();
        (power * ln_sech).exp() * (rho * w.tanh() - 2.0 * eta * w).cos()
    };

    let span = rho * SECH_SPLIT.tanh() + 2.0 * eta.abs() * SECH_SPLIT;
    let quad = Quadrature::new(cfg);
    let points = quad.uniform_partition(0.0, SECH_SPLIT, span / PI)?;
    let head = quad.integrate_partitioned(integrand, &points)?;
    let tail = quad.integrate_to_infinity(integrand, SECH_SPLIT)?;
    let value = head.value + tail.value;
    let loss = (head.magnitude + tail.magnitude) / value.abs();
    log::trace!(
        "coulomb F integral: {} evaluations, error {:e}, cancellation {loss:e}",
        head.evaluations + tail.evaluations,
        head.error + tail.error
    );

    if value == 0.0 {
        return Ok((0.0, loss));
    }
    let f = value.signum() * (ln_prefactor + value.abs().ln()).exp();
    Ok((f, loss))
}

/// H⁺ from the rotated contour, split at u = 1; `∫₀¹` goes through u = e^{-v}.
fn outgoing_integral(
    ell: u32,
    eta: f64,
    rho: f64,
    lg: Complex64,
    cfg: &Config,
) -> Result<(Complex64, f64), Error> {
    let l = f64::from(ell);
    let ln_p = -l * (2.0 * rho).ln() + FRAC_PI_2 * eta - lg.re;
    let s = Complex64::new(l, eta);
    let s_conj = s.conj();
    let exponent = |u: f64, ln_u: f64| {
        s * ln_u + s_conj * Complex64::new(u, -2.0 * rho).ln() + (ln_p - u)
    };

    let quad = Quadrature::new(cfg);
    let inner: Estimate<Complex64> =
        quad.integrate_to_infinity(|v: f64| (exponent((-v).exp(), -v) - v).exp(), 0.0)?;
    let outer: Estimate<Complex64> =
        quad.integrate_to_infinity(|u: f64| exponent(u, u.ln()).exp(), 1.0)?;

    let sum = inner.value + outer.value;
    let loss = (inner.magnitude + outer.magnitude) / sum.norm();
    Ok((Complex64::from_polar(1.0, rho) * sum, loss))
}

/// F from `C_ℓ ρ^{ℓ+1} Σ tⱼ` with `t₀ = 1`, `t₋₁ = 0` and
/// `tⱼ = (2ηρ tⱼ₋₁ - ρ² tⱼ₋₂) / (j (j + 2ℓ + 1))`.
///
/// The terms keep one sign inside the barrier, where both integrals fail.
fn regular_series(
    ell: u32,
    eta: f64,
    rho: f64,
    lg: Complex64,
    cfg: &Config,
) -> Result<(f64, f64), Error> {
    let l = f64::from(ell);
    let mut before = 0.0;
    let sum = sum_series(
        Complex64::new(1.0, 0.0),
        |k, t| {
            let j = k as f64;
            let next = (2.0 * eta * rho * t.re - rho * rho * before) / (j * (j + 2.0 * l + 1.0));
            before = t.re;
            Complex64::new(next, 0.0)
        },
        cfg,
    )?;
    let s = sum.value.re;
    let loss = sum.max_term / s.abs();
    log::trace!("coulomb F series: {} terms, cancellation {loss:e}", sum.terms);
    if s == 0.0 {
        return Ok((0.0, loss));
    }
    let ln_c = l * LN_2 - FRAC_PI_2 * eta + lg.re - ln_gamma_real(2.0 * l + 2.0)?;
    let f = s.signum() * (ln_c + (l + 1.0) * rho.ln() + s.abs().ln()).exp();
    Ok((f, loss))
}

/// Steed's method: `f = F'/F` from a continued fraction in ℓ and
/// `p + iq = H⁺'/H⁺` from one in ρ; the Wronskian `F G' - F' G = 1` fixes
/// the scale.
///
/// `F`'s absolute error scales with `|H⁺|`, so each route's loss is
/// `(1 + |p|/q) |H⁺|` over the value. `None` when a fraction runs out of
/// terms or `q ≤ 0`.
fn steed(ell: u32, eta: f64, rho: f64, cfg: &Config) -> Option<(Route, Route)> {
    // run both fractions to the machine floor
    let (ratio, sign) = steed_ratio(ell, eta, rho, MIN_TOL, cfg.max_terms)?;
    let (p, q) = steed_outgoing(ell, eta, rho, MIN_TOL, cfg.max_terms)?;
    if q.is_nan() || q <= 0.0 {
        return None;
    }
    let gamma = (ratio - p) / q;
    let w = ((ratio - p) * gamma + q).sqrt().recip();
    let f = sign * w;
    let g = gamma * f;
    if !f.is_finite() || !g.is_finite() {
        return None;
    }
    let amp = f.hypot(g) * (1.0 + p.abs() / q);
    log::trace!("coulomb Steed: f = {ratio:e}, p = {p:e}, q = {q:e}");
    Some((Route::new(f, amp / f.abs()), Route::new(g, amp / g.abs())))
}

/// `F'_ℓ/F_ℓ` by modified Lentz, and the sign of `F_ℓ`.
fn steed_ratio(ell: u32, eta: f64, rho: f64, tol: f64, max_terms: usize) -> Option<(f64, f64)> {
    let xi = rho.recip();
    let mut pk = f64::from(ell) + 1.0;
    let mut ratio = eta / pk + pk * xi;
    if ratio.abs() < LENTZ_TINY {
        ratio = LENTZ_TINY;
    }
    let (mut d, mut c, mut sign) = (0.0_f64, ratio, 1.0);
    for _ in 0..max_terms {
        let pk1 = pk + 1.0;
        let ek = eta / pk;
        let rk2 = 1.0 + ek * ek;
        let tk = (pk + pk1) * (xi + ek / pk1);
        d = tk - rk2 * d;
        c = tk - rk2 / c;
        if c.abs() < LENTZ_TINY {
            c = LENTZ_TINY;
        }
        if d.abs() < LENTZ_TINY {
            d = LENTZ_TINY;
        }
        d = d.recip();
        let step = d * c;
        ratio *= step;
        if d < 0.0 {
            sign = -sign;
        }
        pk = pk1;
        if (step - 1.0).abs() <= tol {
            return Some((ratio, sign));
        }
    }
    None
}

/// `p + iq = H⁺'_ℓ/H⁺_ℓ` from its continued fraction in ρ.
fn steed_outgoing(
    ell: u32,
    eta: f64,
    rho: f64,
    tol: f64,
    max_terms: usize,
) -> Option<(f64, f64)> {
    let l = f64::from(ell);
    let xi = rho.recip();
    let mut a = Complex64::new(-(eta * eta + l * (l + 1.0)), eta);
    let mut b = Complex64::new(2.0 * (rho - eta), 2.0);
    let mut d = b.inv();
    let mut delta = Complex64::i() * a * d * xi;
    let mut pq = Complex64::new(0.0, 1.0 - eta * xi);
    let mut pk = 0.0;
    for _ in 0..max_terms {
        pq += delta;
        pk += 2.0;
        a += Complex64::new(pk, 2.0 * eta);
        b += Complex64::new(0.0, 2.0);
        d = (a * d + b).inv();
        delta *= b * d - 1.0;
        if delta.l1_norm() < pq.l1_norm() * tol {
            return Some((pq.re, pq.im));
        }
    }
    None
}

fn check_cross(ell: u32, eta: f64, rho: f64, f: f64, g: f64, cfg: &Config) -> Result<(), Error> {
    let (f_prev, g_prev) = coulomb_fg_with(ell - 1, eta, rho, &cfg.with_wronskian_check(false))?;
    let expected = coulomb_cross(ell, eta);
    let residual = ((f_prev * g - f * g_prev) - expected).abs() / expected;
    if residual > working_tol(cfg.tol).sqrt() {
        log::warn!(
            "coulomb cross relation off by {residual:e} at l = {ell}, eta = {eta}, rho = {rho}"
        );
        return Err(Error::ConvergenceFailure {
            estimate: Complex64::new(g, f),
            error_bound: residual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    // (ℓ, η, ρ, F, G)
    const REFERENCE: [(u32, f64, f64, f64, f64); 9] = [
        (0, 1.0, 2.0, 0.661_781_613_832_681_298_3, 1.275_778_784_768_276_589),
        (0, -1.0, 2.0, -0.590_212_663_389_882_343_2, -0.604_708_122_963_932_619_3),
        (2, 0.5, 3.0, 0.669_945_788_667_849_855_2, 1.236_592_227_307_829_459),
        (1, 2.0, 5.0, 0.993_505_675_214_803_253_0, 1.081_482_760_400_010_975),
        (3, -2.0, 10.0, 0.016_803_811_739_245_932_48, -0.940_023_081_840_686_011_4),
        (0, 5.0, 10.0, 0.917_944_918_945_897_700_5, 1.608_524_555_599_835_509),
        (5, 1.0, 0.5, 3.073_089_533_857_415_966e-7, 146_112.000_813_892_388_2),
        (0, 1.0, 1e-6, 1.084_226_215_246_037_915e-7, 9.222_939_265_998_103_750),
        (0, 0.5, 35.0, 0.945_669_764_571_900_833_2, 0.346_845_269_995_594_904_8),
    ];

    #[test]
    fn reference_values() {
        for (ell, eta, rho, f, g) in REFERENCE {
            let (fv, gv) = coulomb_fg(ell, eta, rho).unwrap();
            assert!(rel(fv, f) < 1e-12, "F_{ell}({eta}, {rho}) = {fv}, expected {f}");
            assert!(rel(gv, g) < 1e-12, "G_{ell}({eta}, {rho}) = {gv}, expected {g}");
        }
    }

    #[test]
    fn very_large_rho() {
        let (f, g) = coulomb_fg(0, 1.0, 1e4).unwrap();
        assert!((f + 0.452_655_953_515_982_042_2).abs() < 1e-11);
        assert!((g - 0.891_741_331_748_471_345_7).abs() < 1e-11);
        assert_eq!(classify(0, 1.0, 1e4, 1e-15), Regime::LargeArgument);
    }

    #[test]
    fn free_particle_closed_forms() {
        for rho in [0.7, 3.0, 12.0] {
            let (f0, g0) = coulomb_fg(0, 0.0, rho).unwrap();
            assert!((f0 - rho.sin()).abs() < 1e-13);
            assert!((g0 - rho.cos()).abs() < 1e-13);
            let (f1, g1) = coulomb_fg(1, 0.0, rho).unwrap();
            assert!((f1 - (rho.sin() / rho - rho.cos())).abs() < 1e-13);
            assert!((g1 - (rho.cos() / rho + rho.sin())).abs() < 1e-13);
        }
    }

    #[test]
    fn normalization() {
        assert!(rel(coulomb_normalization(0, 1.0), 0.108_422_513_102_072_623_9) < 1e-14);
        assert!(rel(coulomb_normalization(0, -1.0), 2.508_972_050_168_545_737) < 1e-14);
        assert!(rel(coulomb_normalization(2, 0.5), 0.028_940_601_398_482_075_77) < 1e-14);
        assert!(rel(coulomb_normalization(0, 5.0), 8.446_818_591_521_346_459e-7) < 1e-13);
        // C₀(η) = √(2πη / (e^{2πη} - 1))
        let eta = 0.8;
        let x = 2.0 * PI * eta;
        assert!(rel(coulomb_normalization(0, eta), (x / x.exp_m1()).sqrt()) < 1e-14);
        assert!(rel(coulomb_normalization(1, 0.0), 1.0 / 3.0) < 1e-15);
    }

    #[test]
    fn phase_shift_and_phase() {
        assert!(rel(coulomb_phase_shift(0, 1.0), -0.301_640_320_467_533_197_9) < 1e-14);
        assert_eq!(coulomb_phase_shift(3, 0.0), 0.0);
        // σ_{ℓ+1} = σ_ℓ + arctan(η/(ℓ+1))
        let eta = 1.7;
        let step = coulomb_phase_shift(2, eta) - coulomb_phase_shift(1, eta);
        assert!((step - (eta / 2.0).atan()).abs() < 1e-14);
        let theta = coulomb_phase(1, 0.0, 4.0);
        assert!((theta - (4.0 - FRAC_PI_2)).abs() < 1e-15);
    }

    #[test]
    fn h_plus_and_minus() {
        let (f, g) = coulomb_fg(2, 0.5, 3.0).unwrap();
        let hp = coulomb_h_plus(2, 0.5, 3.0).unwrap();
        let hm = coulomb_h_minus(2, 0.5, 3.0).unwrap();
        assert_eq!(hp, Complex64::new(g, f));
        assert_eq!(hm, hp.conj());
    }

    #[test]
    fn classification() {
        assert_eq!(classify(0, 1.0, 0.0, 1e-15), Regime::SmallArgument);
        assert_eq!(classify(0, 0.0, 1e-20, 1e-15), Regime::SmallArgument);
        assert_eq!(classify(0, 1.0, 1e-6, 1e-15), Regime::Exact);
        assert_eq!(classify(2, 0.5, 3.0, 1e-15), Regime::Exact);
        assert_eq!(classify(0, 0.5, 35.0, 1e-15), Regime::LargeArgument);
        // onset grows with ℓ(ℓ+1) + η²
        assert_eq!(classify(6, 0.0, 35.0, 1e-15), Regime::Exact);
        // looser tolerance widens both closed-form regimes
        assert_eq!(classify(0, 0.5, 20.0, 1e-6), Regime::LargeArgument);
    }

    #[test]
    fn regimes_overlap() {
        let cfg = Config::default();
        let (eta, rho) = (0.5, 35.0);
        let (fe, ge) = coulomb_in_regime(Regime::Exact, 0, eta, rho, &cfg).unwrap();
        let (fa, ga) = coulomb_in_regime(Regime::LargeArgument, 0, eta, rho, &cfg).unwrap();
        assert!((fe - fa).abs() < 1e-12);
        assert!((ge - ga).abs() < 1e-12);
    }

    #[test]
    fn small_argument_matches_exact() {
        let cfg = Config::default();
        let rho = 1e-11;
        let (fs, gs) = coulomb_in_regime(Regime::SmallArgument, 1, 0.3, rho, &cfg).unwrap();
        let (fe, ge) = coulomb_in_regime(Regime::Exact, 1, 0.3, rho, &cfg).unwrap();
        assert!(rel(fs, fe) < 1e-8);
        assert!(rel(gs, ge) < 1e-8);
    }

    #[test]
    fn forced_asymptotic_reports_failure() {
        let err = coulomb_in_regime(Regime::LargeArgument, 0, 1.0, 2.0, &Config::default());
        assert!(matches!(err, Err(Error::ConvergenceFailure { .. })));
    }

    #[test]
    fn wronskian_check_passes() {
        let cfg = Config::default().with_wronskian_check(true);
        let (f, _) = coulomb_fg_with(2, 0.5, 3.0, &cfg).unwrap();
        assert!(rel(f, 0.669_945_788_667_849_855_2) < 1e-12);
        assert!(coulomb_fg_with(1, -1.0, 8.0, &cfg).is_ok());
    }

    #[test]
    fn closed_form_helpers() {
        assert_eq!(regular_coulomb_approx(0, 1.0, 0.0), 0.0);
        let g = irregular_coulomb_approx(0, 1.0, 0.0);
        assert!(rel(g, 1.0 / 0.108_422_513_102_072_623_9) < 1e-14);
        let (eta, rho) = (0.5, 35.0);
        let theta = coulomb_phase(0, eta, rho);
        assert_eq!(regular_coulomb_limit(0, eta, rho), theta.sin());
        assert_eq!(irregular_coulomb_limit(0, eta, rho), theta.cos());
        assert!((regular_coulomb_limit(0, eta, rho) - 0.945_669_764_571_900_833).abs() < 5e-2);
        assert_eq!(coulomb_cross(0, 1.0), 0.0);
        assert!((coulomb_cross(3, 4.0) - 0.6).abs() < 1e-16);
    }

    #[test]
    fn deep_attractive_field() {
        // (ℓ, η, ρ, F, G)
        let cases = [
            (0, -5.0, 5.0, 0.714_302_738_874_639_409_6, -0.260_509_876_863_709_801_7),
            (0, -10.0, 5.0, 0.620_646_649_529_724_202_3, 0.249_736_193_822_842_166_5),
            (0, -20.0, 5.0, 0.105_474_310_519_822_003_4, -0.567_762_845_357_075_965_2),
            (0, -25.0, 5.0, -0.026_023_570_451_051_724_99, 0.548_581_460_721_882_218_1),
            (0, -30.0, 5.0, 0.112_834_839_914_260_096_9, -0.514_491_643_109_067_770_8),
            (2, -15.0, 4.0, -0.123_631_252_449_441_866_6, -0.579_462_217_140_118_276_2),
        ];
        for (ell, eta, rho, f, g) in cases {
            let (fv, gv) = coulomb_fg(ell, eta, rho).unwrap();
            assert!(rel(fv, f) < 1e-12, "F_{ell}({eta}, {rho}) = {fv}, expected {f}");
            assert!(rel(gv, g) < 1e-12, "G_{ell}({eta}, {rho}) = {gv}, expected {g}");
        }
    }

    #[test]
    fn inside_the_barrier() {
        let (f, g) = coulomb_fg(0, 10.0, 3.0).unwrap();
        assert!(rel(f, 2.578_545_611_034_551_159e-8) < 1e-12);
        assert!(rel(g, 8_133_270.084_631_045_980) < 1e-12);

        // G here comes from Re H⁺ with about three digits of cancellation
        match coulomb_fg(0, 20.0, 10.0) {
            Ok((f, g)) => {
                assert!(rel(f, 8.047_048_395_493_742_592e-12) < 1e-11);
                assert!(rel(g, 35_866_777_156.780_806_58) < 1e-11);
            }
            Err(err) => assert!(matches!(err, Error::ConvergenceFailure { .. })),
        }
    }

    #[test]
    fn unresolvable_cancellation_is_reported() {
        let (f, g) = (0.001_203_662_495_751_172_853, 832.243_180_019_906_326_0);
        let err = coulomb_fg(0, 50.0, 80.0).unwrap_err();
        let Error::ConvergenceFailure { estimate, .. } = err else {
            panic!("expected a convergence failure, got {err:?}");
        };
        assert!(rel(estimate.re, g) < 1e-6);

        let loose = Config::default().with_tol(1e-8);
        let (fv, gv) = coulomb_fg_with(0, 50.0, 80.0, &loose).unwrap();
        assert!(rel(fv, f) < 1e-8);
        assert!(rel(gv, g) < 1e-8);
    }

    #[test]
    fn steed_fractions() {
        let cfg = Config::default();
        let (f, g) = steed(0, -20.0, 5.0, &cfg).unwrap();
        assert!(rel(f.value, 0.105_474_310_519_822_003_4) < 1e-13);
        assert!(rel(g.value, -0.567_762_845_357_075_965_2) < 1e-13);
        assert!(f.loss < 10.0 && g.loss < 10.0);
        // deep under the barrier q = 1/|H⁺|² vanishes into roundoff
        let under = steed(0, 10.0, 0.01, &cfg);
        assert!(under.map_or(true, |(f, _)| f.loss > 1e4));
    }

    #[test]
    fn power_series_inside_the_barrier() {
        let cfg = Config::default();
        let lg = ln_gamma_eta(0, 10.0).unwrap();
        let (f, loss) = regular_series(0, 10.0, 3.0, lg, &cfg).unwrap();
        assert!(rel(f, 2.578_545_611_034_551_159e-8) < 1e-13);
        assert!(loss <= 1.0);
        // free particle: F₀ = sin ρ
        let lg = ln_gamma_eta(0, 0.0).unwrap();
        let (f, _) = regular_series(0, 0.0, 1.3, lg, &cfg).unwrap();
        assert!(rel(f, 1.3_f64.sin()) < 1e-14);
    }

    #[test]
    fn small_argument_bound_grows_with_eta() {
        // ρ |η| (2 + |ln 2ρ|) alone sits under 1e-15 here
        assert_eq!(classify(0, 1e3, 2e-20, 1e-15), Regime::Exact);
        assert_eq!(classify(0, 1e3, 1e-21, 1e-15), Regime::SmallArgument);
    }

    #[test]
    fn domain_errors() {
        assert!(matches!(regular_coulomb(0, 1.0, -1.0), Err(Error::Domain { .. })));
        assert!(matches!(irregular_coulomb(0, f64::NAN, 1.0), Err(Error::Domain { .. })));
        assert!(matches!(coulomb_fg(0, 1.0, f64::INFINITY), Err(Error::Domain { .. })));
    }
}
