//! Fresnel integrals S(x) = ∫₀ˣ sin t² dt and C(x) = ∫₀ˣ cos t² dt.
//!
//! Three evaluation paths are exposed:
//!
//! - `*_integral`: quadrature with breakpoints at √(kπ), so every panel
//!   spans exactly half a period of the integrand. Beyond `|x| = 32` the
//!   auxiliary functions f and g are summed from their asymptotic series.
//! - `*_erf`: closed forms through the complex error function.
//! - `*_pi`: the normalisation ∫₀ˣ sin(πt²/2) dt used by Abramowitz & Stegun.

use core::f64::consts::{FRAC_1_SQRT_2, FRAC_2_PI, FRAC_PI_2, PI};

use num_complex::Complex64;

use crate::algo::constants::SQRT_HALF_PI;
use crate::algo::quad::Quadrature;
use crate::algo::series::sum_asymptotic;
use crate::gamma::erf;
use crate::types::{Config, Error};
use crate::utils::{mul_i, mul_neg_i};

/// From this |x| on the auxiliary-function expansion replaces quadrature.
const ASYMPTOTIC_ARG: f64 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Sine,
    Cosine,
}

// ── quadrature path ──

/// S(x) by quadrature with the default configuration.
pub fn fresnel_s_integral(x: f64) -> Result<f64, Error> {
    fresnel_s_integral_with(x, &Config::default())
}

/// C(x) by quadrature with the default configuration.
pub fn fresnel_c_integral(x: f64) -> Result<f64, Error> {
    fresnel_c_integral_with(x, &Config::default())
}

/// S(x) by quadrature.
pub fn fresnel_s_integral_with(x: f64, cfg: &Config) -> Result<f64, Error> {
    fresnel_integral(Kind::Sine, x, cfg)
}

/// C(x) by quadrature.
pub fn fresnel_c_integral_with(x: f64, cfg: &Config) -> Result<f64, Error> {
    fresnel_integral(Kind::Cosine, x, cfg)
}

fn fresnel_integral(kind: Kind, x: f64, cfg: &Config) -> Result<f64, Error> {
    cfg.validate()?;
    if x.is_nan() {
        return Ok(f64::NAN);
    }
    if x.is_infinite() {
        // S(∞) = C(∞) = √(π/8)
        return Ok(x.signum() * 0.5 * SQRT_HALF_PI);
    }
    if x == 0.0 {
        return Ok(0.0);
    }

    let ax = x.abs();
    if ax >= ASYMPTOTIC_ARG {
        if let Some(v) = fresnel_asymptotic(kind, ax, cfg) {
            return Ok(x.signum() * v);
        }
        log::debug!("fresnel({x}): auxiliary expansion misses tolerance, integrating");
    }
    let quad = Quadrature::new(cfg);
    quad.panel_count(ax * ax / PI)?;
    let points = half_period_points(ax);
    let est = match kind {
        Kind::Sine => quad.integrate_partitioned(|t: f64| (t * t).sin(), &points)?,
        Kind::Cosine => quad.integrate_partitioned(|t: f64| (t * t).cos(), &points)?,
    };
    Ok(x.signum() * est.value)
}

/// 0, √π, √(2π), … up to and including `x`.
fn half_period_points(x: f64) -> Vec<f64> {
    let count = (x * x / PI).floor() as usize;
    let mut points: Vec<f64> = (0..=count).map(|k| (k as f64 * PI).sqrt()).collect();
    if points.last().is_some_and(|&p| p < x) {
        points.push(x);
    }
    points
}

/// Large-x form through the auxiliary functions
///
/// ```text
/// S(x) = √(π/8) - f cos x² - g sin x²
/// C(x) = √(π/8) + f sin x² - g cos x²
/// f ~ 1/(2x) Σ (-1)ᵐ (4m-1)!! / (2x²)^{2m},  g ~ 1/(4x³) Σ (-1)ᵐ (4m+1)!! / (2x²)^{2m}
/// ```
fn fresnel_asymptotic(kind: Kind, x: f64, cfg: &Config) -> Option<f64> {
    let w = 4.0 * x.powi(4);
    let f = sum_asymptotic(
        Complex64::new(0.5 / x, 0.0),
        |m, t| {
            let m = m as f64;
            -t * ((4.0 * m - 3.0) * (4.0 * m - 1.0) / w)
        },
        cfg,
    );
    let g = sum_asymptotic(
        Complex64::new(0.25 / x.powi(3), 0.0),
        |m, t| {
            let m = m as f64;
            -t * ((4.0 * m - 1.0) * (4.0 * m + 1.0) / w)
        },
        cfg,
    );
    if !(f.meets(cfg.tol) && g.meets(cfg.tol)) {
        return None;
    }

    // x² = hi + lo exactly, so the phase survives for large x
    let hi = x * x;
    let lo = x.mul_add(x, -hi);
    let (sh, ch) = hi.sin_cos();
    let (sl, cl) = lo.sin_cos();
    let sin_x2 = sh * cl + ch * sl;
    let cos_x2 = ch * cl - sh * sl;

    let (f, g) = (f.value.re, g.value.re);
    let half = 0.5 * SQRT_HALF_PI;
    Some(match kind {
        Kind::Sine => half - f * cos_x2 - g * sin_x2,
        Kind::Cosine => half + f * sin_x2 - g * cos_x2,
    })
}

// ── error-function path ──

/// S(x) = Re[√(π/2) (1+i)/4 (erf((1+i)x/√2) - i erf((1-i)x/√2))].
pub fn fresnel_s_erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let (ep, em) = erf_pair(x);
    let w = ep - mul_i(em);
    // (1+i) w
    ((w + mul_i(w)) * (0.25 * SQRT_HALF_PI)).re
}

/// C(x) = Re[√(π/2) (1-i)/4 (erf((1+i)x/√2) + i erf((1-i)x/√2))].
pub fn fresnel_c_erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let (ep, em) = erf_pair(x);
    let w = ep + mul_i(em);
    // (1-i) w
    ((w + mul_neg_i(w)) * (0.25 * SQRT_HALF_PI)).re
}

/// erf((1+i)x/√2), erf((1-i)x/√2).
fn erf_pair(x: f64) -> (Complex64, Complex64) {
    let a = x * FRAC_1_SQRT_2;
    (erf(Complex64::new(a, a)), erf(Complex64::new(a, -a)))
}

// ── π/2 normalisation ──

/// ∫₀ˣ sin(πt²/2) dt with the default configuration.
pub fn fresnel_s_pi(x: f64) -> Result<f64, Error> {
    fresnel_s_pi_with(x, &Config::default())
}

/// ∫₀ˣ cos(πt²/2) dt with the default configuration.
pub fn fresnel_c_pi(x: f64) -> Result<f64, Error> {
    fresnel_c_pi_with(x, &Config::default())
}

/// ∫₀ˣ sin(πt²/2) dt.
pub fn fresnel_s_pi_with(x: f64, cfg: &Config) -> Result<f64, Error> {
    Ok(FRAC_2_PI.sqrt() * fresnel_s_integral_with(x * FRAC_PI_2.sqrt(), cfg)?)
}

/// ∫₀ˣ cos(πt²/2) dt.
pub fn fresnel_c_pi_with(x: f64, cfg: &Config) -> Result<f64, Error> {
    Ok(FRAC_2_PI.sqrt() * fresnel_c_integral_with(x * FRAC_PI_2.sqrt(), cfg)?)
}
