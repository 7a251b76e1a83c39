//! Complex gamma, log-gamma, digamma and error function.
//!
//! `ln_gamma` uses Stirling's series with the Bernoulli table shared with
//! the rest of the crate, upward recursion until `|z| ≥ 10`, and the
//! reflection formula for `Re z < ½`. `erf` switches between the Maclaurin
//! series and the Laplace continued fraction for `erfc` according to the
//! cancellation the series would suffer.

use core::f64::consts::{LN_2, PI};

use num_complex::Complex64;

use crate::algo::constants::{CF_TABLE, HALF_LN_2PI, LN_PI, SQRT_PI};
use crate::machine::MACH_EPSILON;
use crate::types::Error;
use crate::utils::{cospi, mul_i, nonpositive_integer, sinpi};

/// Recursion target for the Stirling and digamma asymptotic series.
const ASYMPTOTIC_MIN: f64 = 10.0;

/// Above this `|Im z|`, `sin(πz)` is built from a single exponential.
const LARGE_IMAG: f64 = 20.0;

/// Depth of the backward continued-fraction evaluation for `erfc`.
const ERFC_CF_DEPTH: usize = 400;

/// Maximum natural-log cancellation accepted in the `erf` Maclaurin series.
const ERF_SERIES_LOSS: f64 = 6.0;

#[inline]
fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

// ── log-gamma ──

/// Principal-branch-continuous ln Γ(z).
///
/// # Errors
///
/// [`Error::Domain`] at the poles `z = 0, -1, -2, …` or for non-finite `z`.
pub fn ln_gamma(z: Complex64) -> Result<Complex64, Error> {
    if !(z.re.is_finite() && z.im.is_finite()) {
        return Err(Error::domain("gamma argument must be finite"));
    }
    if nonpositive_integer(z).is_some() {
        return Err(Error::domain("gamma pole at non-positive integer"));
    }
    if z.re < 0.5 {
        // Γ(z)Γ(1-z) = π / sin(πz)
        return Ok(c(LN_PI) - ln_sin_pi(z) - ln_gamma_right(c(1.0) - z));
    }
    Ok(ln_gamma_right(z))
}

/// ln Γ(x) for real `x > 0`.
pub fn ln_gamma_real(x: f64) -> Result<f64, Error> {
    if !(x > 0.0) || !x.is_finite() {
        return Err(Error::domain("real log-gamma needs a positive finite argument"));
    }
    Ok(ln_gamma_right(c(x)).re)
}

/// Γ(z).
pub fn gamma(z: Complex64) -> Result<Complex64, Error> {
    Ok(ln_gamma(z)?.exp())
}

/// 1/Γ(z); zero at the poles of Γ.
pub fn rgamma(z: Complex64) -> Complex64 {
    if nonpositive_integer(z).is_some() {
        return c(0.0);
    }
    match ln_gamma(z) {
        Ok(lg) => (-lg).exp(),
        Err(_) => Complex64::new(f64::NAN, f64::NAN),
    }
}

/// ln Γ for `Re z ≥ ½`.
fn ln_gamma_right(z: Complex64) -> Complex64 {
    let mut w = z;
    let mut shift = c(0.0);
    while w.norm() < ASYMPTOTIC_MIN {
        shift += w.ln();
        w += 1.0;
    }

    let rw = w.inv();
    let rw2 = rw * rw;
    let mut p = rw;
    let mut series = c(0.0);
    for &cf in CF_TABLE.iter() {
        let t = p * cf;
        series += t;
        if t.norm() <= MACH_EPSILON * series.norm() {
            break;
        }
        p *= rw2;
    }

    (w - 0.5) * w.ln() - w + HALF_LN_2PI + series - shift
}

/// ln sin(πz), any branch; overflow-safe for large |Im z|.
fn ln_sin_pi(z: Complex64) -> Complex64 {
    let (x, y) = (z.re, z.im);
    if y.abs() < LARGE_IMAG {
        let s = Complex64::new(sinpi(x) * (PI * y).cosh(), cospi(x) * (PI * y).sinh());
        return s.ln();
    }
    // sin(πz) = (i/2) e^{-iπz} (1 - e^{2iπz}) for y > 0, conjugate form for y < 0
    let q_mag = (-2.0 * PI * y.abs()).exp();
    if y > 0.0 {
        let q = Complex64::new(cospi(2.0 * x), sinpi(2.0 * x)) * q_mag;
        Complex64::new(PI * y - LN_2, PI * (0.5 - x)) + (c(1.0) - q).ln()
    } else {
        let q = Complex64::new(cospi(2.0 * x), -sinpi(2.0 * x)) * q_mag;
        Complex64::new(-PI * y - LN_2, PI * (x - 0.5)) + (c(1.0) - q).ln()
    }
}

// ── digamma ──

/// ψ(z) = Γ'(z)/Γ(z).
///
/// # Errors
///
/// [`Error::Domain`] at the poles of Γ or for non-finite `z`.
pub fn digamma(z: Complex64) -> Result<Complex64, Error> {
    if !(z.re.is_finite() && z.im.is_finite()) {
        return Err(Error::domain("digamma argument must be finite"));
    }
    if nonpositive_integer(z).is_some() {
        return Err(Error::domain("digamma pole at non-positive integer"));
    }
    if z.re < 0.5 {
        // ψ(1-z) - ψ(z) = π cot(πz)
        return Ok(digamma_right(c(1.0) - z) - cot_pi(z) * PI);
    }
    Ok(digamma_right(z))
}

fn digamma_right(z: Complex64) -> Complex64 {
    let mut w = z;
    let mut shift = c(0.0);
    while w.norm() < ASYMPTOTIC_MIN {
        shift += w.inv();
        w += 1.0;
    }

    let rw = w.inv();
    let rw2 = rw * rw;
    let mut p = rw2;
    let mut series = c(0.0);
    for (k, &cf) in CF_TABLE.iter().enumerate() {
        // B_{2k}/(2k) = CF_k (2k-1)
        let t = p * (cf * (2 * k + 1) as f64);
        series += t;
        if t.norm() <= MACH_EPSILON * series.norm() {
            break;
        }
        p *= rw2;
    }

    w.ln() - rw * 0.5 - series - shift
}

/// cot(πz), away from the poles.
fn cot_pi(z: Complex64) -> Complex64 {
    let (x, y) = (z.re, z.im);
    if y == 0.0 {
        return c(cospi(x) / sinpi(x));
    }
    // cot(πz) = i (q + 1)/(q - 1), q = e^{2iπz}; use |q| ≤ 1
    if y > 0.0 {
        let q = Complex64::new(cospi(2.0 * x), sinpi(2.0 * x)) * (-2.0 * PI * y).exp();
        mul_i((q + 1.0) / (q - 1.0))
    } else {
        let q = Complex64::new(cospi(2.0 * x), -sinpi(2.0 * x)) * (2.0 * PI * y).exp();
        mul_i((c(1.0) + q) / (c(1.0) - q))
    }
}

// ── error function ──

/// erf(z) for complex `z`.
pub fn erf(z: Complex64) -> Complex64 {
    if z.re < 0.0 || (z.re == 0.0 && z.im < 0.0) {
        return -erf(-z);
    }
    if z.re == 0.0 && z.im == 0.0 {
        return z;
    }

    let z2 = z * z;
    let r2 = z.norm_sqr();
    let dominant = (-z2.re - (SQRT_PI * z.norm()).ln()).max(0.0);
    if r2 - dominant < ERF_SERIES_LOSS || z.re == 0.0 {
        erf_series(z)
    } else {
        c(1.0) - erfc_continued_fraction(z)
    }
}

/// Maclaurin series `2/√π Σ (-1)ⁿ z^{2n+1} / (n! (2n+1))`.
fn erf_series(z: Complex64) -> Complex64 {
    let mz2 = -(z * z);
    let mut t = z;
    let mut sum = z;
    let mut n = 1usize;
    let floor = (z.norm_sqr() + 1.0) as usize;
    loop {
        t = t * mz2 / n as f64;
        let term = t / (2 * n + 1) as f64;
        sum += term;
        if n > floor && term.norm() <= 0.25 * MACH_EPSILON * sum.norm() {
            break;
        }
        if !sum.re.is_finite() || !sum.im.is_finite() || n > 100_000 {
            break;
        }
        n += 1;
    }
    sum * (2.0 / SQRT_PI)
}

/// erfc(z) for `Re z > 0` by the Laplace continued fraction
/// `erfc z = e^{-z²}/√π · 1/(z + ½/(z + 1/(z + (3/2)/(z + …))))`.
fn erfc_continued_fraction(z: Complex64) -> Complex64 {
    let mut f = z;
    for k in (1..=ERFC_CF_DEPTH).rev() {
        f = z + (0.5 * k as f64) / f;
    }
    (-(z * z)).exp() / (f * SQRT_PI)
}
