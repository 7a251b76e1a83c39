//! Debye functions D_n(x) = n/xⁿ ∫₀ˣ tⁿ/(eᵗ - 1) dt.

use num_complex::Complex64;

use crate::algo::constants::{bernoulli_2k, CF_TABLE};
use crate::algo::quad::Quadrature;
use crate::algo::series::sum_series;
use crate::types::{Config, Error};

/// Beyond this |x| the Bernoulli series is abandoned for quadrature.
const SERIES_LIMIT: f64 = 2.0;

/// D_n(x) with the default configuration.
pub fn debye(n: u32, x: f64) -> Result<f64, Error> {
    debye_with(n, x, &Config::default())
}

/// Debye function of order `n ≥ 1`.
///
/// `D_n(0) = 1` for every order. Negative `x` is integrated directly, so
/// `D_n(-x) = D_n(x) + n x/(n+1)` holds to working accuracy.
///
/// # Errors
///
/// [`Error::Domain`] for `n = 0`.
pub fn debye_with(n: u32, x: f64, cfg: &Config) -> Result<f64, Error> {
    cfg.validate()?;
    if n == 0 {
        return Err(Error::domain("Debye order must be at least 1"));
    }
    if x.is_nan() {
        return Ok(f64::NAN);
    }
    if x == 0.0 {
        return Ok(1.0);
    }
    if x == f64::INFINITY {
        return Ok(0.0);
    }
    if x == f64::NEG_INFINITY {
        return Ok(f64::INFINITY);
    }

    if x.abs() <= SERIES_LIMIT {
        debye_series(n, x, cfg)
    } else {
        debye_quadrature(n, x, cfg)
    }
}

/// 1 - n x/(2(n+1)) + n Σ B_{2k} x^{2k} / ((2k)! (2k+n)).
fn debye_series(n: u32, x: f64, cfg: &Config) -> Result<f64, Error> {
    let nf = f64::from(n);
    let x2 = x * x;

    // term_k carries x^{2k}/(2k)!; the Bernoulli and (2k+n) factors are applied on the fly
    let coefficient = |k: usize| bernoulli_2k(k) / (2.0 * k as f64 + nf);
    let first = Complex64::new(coefficient(1) * x2 / 2.0, 0.0);
    let mut power = x2 / 2.0;
    let tail = sum_series(
        first,
        |j, _| {
            let k = j + 1;
            if k > CF_TABLE.len() {
                return Complex64::new(0.0, 0.0);
            }
            let m = 2.0 * k as f64;
            power *= x2 / (m * (m - 1.0));
            Complex64::new(coefficient(k) * power, 0.0)
        },
        cfg,
    )?;

    Ok(1.0 - nf * x / (2.0 * (nf + 1.0)) + nf * tail.value.re)
}

/// n/x ∫₀^L (t/x)^{n-1} t/(eᵗ-1) dt, with `L = min(x, 60 + 3n)` for positive `x`.
fn debye_quadrature(n: u32, x: f64, cfg: &Config) -> Result<f64, Error> {
    let nf = f64::from(n);
    let upper = if x > 0.0 { x.min(60.0 + 3.0 * nf) } else { x };
    let exponent = i32::try_from(n - 1).unwrap_or(i32::MAX);

    let integrand = |t: f64| {
        let bose = if t == 0.0 { 1.0 } else { t / t.exp_m1() };
        (t / x).powi(exponent) * bose
    };
    let est = Quadrature::new(cfg).integrate(integrand, 0.0, upper)?;
    Ok(nf / x * est.value)
}
