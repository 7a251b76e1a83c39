//! Struve function H_ν(z) for real order ν ≥ 0 and real argument.

use core::f64::consts::{FRAC_PI_2, LN_2, PI};

use num_complex::Complex64;

use crate::algo::constants::LN_PI;
use crate::algo::quad::Quadrature;
use crate::algo::series::sum_asymptotic;
use crate::gamma::ln_gamma_real;
use crate::types::{Config, Error};

/// From this argument on the large-z expansion is tried before quadrature.
const ASYMPTOTIC_ARG: f64 = 20.0;

/// H_ν(z) with the default configuration.
pub fn struve(nu: f64, z: f64) -> Result<f64, Error> {
    struve_with(nu, z, &Config::default())
}

/// Struve function from the Poisson-type integral
///
/// ```text
/// H_ν(z) = 2 (z/2)^ν / (√π Γ(ν+½)) ∫₀^{π/2} sin(z cos θ) sin^{2ν}θ dθ
/// ```
///
/// The prefactor is formed in log space. The θ-range is pre-split so that
/// each panel carries a bounded share of the phase `z cos θ`.
///
/// For `z ≥ 20` the expansion of `H_ν - Y_ν` together with the Hankel
/// expansion of `Y_ν` is used instead whenever both truncation bounds meet
/// the tolerance.
///
/// Negative `z` is accepted for integer ν through
/// `H_ν(-z) = (-1)^{ν+1} H_ν(z)`.
///
/// # Errors
///
/// [`Error::Domain`] for negative or non-finite ν, and for negative `z`
/// with non-integer ν (the result would be complex).
/// [`Error::ConvergenceFailure`] when quadrature is needed and the phase span
/// would exceed `cfg.max_panels` starting panels.
pub fn struve_with(nu: f64, z: f64, cfg: &Config) -> Result<f64, Error> {
    cfg.validate()?;
    if !nu.is_finite() || nu < 0.0 {
        return Err(Error::domain("Struve order must be finite and non-negative"));
    }
    if z.is_nan() {
        return Ok(f64::NAN);
    }
    if z == 0.0 {
        return Ok(0.0);
    }
    if z < 0.0 {
        if nu.fract() != 0.0 {
            return Err(Error::domain("Struve function of negative argument needs integer order"));
        }
        // (-1)^{ν+1}: odd for even ν, even for odd ν
        let sign = if nu % 2.0 == 0.0 { -1.0 } else { 1.0 };
        return Ok(sign * struve_positive(nu, -z, cfg)?);
    }
    struve_positive(nu, z, cfg)
}

fn struve_positive(nu: f64, z: f64, cfg: &Config) -> Result<f64, Error> {
    if !z.is_finite() {
        return Err(Error::domain("Struve argument must be finite"));
    }
    if z >= ASYMPTOTIC_ARG {
        if let Some(v) = struve_asymptotic(nu, z, cfg)? {
            return Ok(v);
        }
        log::debug!("struve({nu}, {z}): large-z expansion misses tolerance, integrating");
    }
    struve_integral(nu, z, cfg)
}

fn struve_integral(nu: f64, z: f64, cfg: &Config) -> Result<f64, Error> {
    let ln_prefactor = LN_2 + nu * (0.5 * z).ln() - 0.5 * LN_PI - ln_gamma_real(nu + 0.5)?;

    let quad = Quadrature::new(cfg);
    let points = quad.uniform_partition(0.0, FRAC_PI_2, z / PI + 1.0)?;
    let two_nu = 2.0 * nu;
    let est = quad.integrate_partitioned(
        |theta: f64| (z * theta.cos()).sin() * theta.sin().powf(two_nu),
        &points,
    )?;

    if est.value == 0.0 {
        return Ok(0.0);
    }
    // keep the sign out of the logarithm
    Ok(est.value.signum() * (ln_prefactor + est.value.abs().ln()).exp())
}

/// Large-z form
///
/// ```text
/// H_ν(z) = Y_ν(z) + 1/π Σₖ Γ(k+½) (z/2)^{ν-2k-1} / Γ(ν+½-k)
/// Y_ν(z) ~ √(2/(πz)) (P sin ω + Q cos ω),  ω = z - (ν/2 + 1/4)π
/// ```
///
/// `None` when any of the three sums misses the tolerance.
fn struve_asymptotic(nu: f64, z: f64, cfg: &Config) -> Result<Option<f64>, Error> {
    let mu = 4.0 * nu * nu;
    let w = (8.0 * z).powi(2);
    let odd = |j: f64| mu - (2.0 * j - 1.0).powi(2);

    let p = sum_asymptotic(
        Complex64::new(1.0, 0.0),
        |m, t| {
            let m = m as f64;
            -t * (odd(2.0 * m - 1.0) * odd(2.0 * m) / ((2.0 * m - 1.0) * 2.0 * m * w))
        },
        cfg,
    );
    let q = sum_asymptotic(
        Complex64::new(odd(1.0) / (8.0 * z), 0.0),
        |m, t| {
            let m = m as f64;
            -t * (odd(2.0 * m) * odd(2.0 * m + 1.0) / (2.0 * m * (2.0 * m + 1.0) * w))
        },
        cfg,
    );
    let lead = ((nu - 1.0) * (0.5 * z).ln() - 0.5 * LN_PI - ln_gamma_real(nu + 0.5)?).exp();
    let inv_half_sq = (2.0 / z).powi(2);
    let k = sum_asymptotic(
        Complex64::new(lead, 0.0),
        |k, t| {
            let k = k as f64;
            t * ((k - 0.5) * (nu + 0.5 - k) * inv_half_sq)
        },
        cfg,
    );
    if !(p.meets(cfg.tol) && q.meets(cfg.tol) && k.meets(cfg.tol)) {
        return Ok(None);
    }

    // sin ω, cos ω without forming z - shift, which rounds away the phase for large z
    let (sz, cz) = z.sin_cos();
    let (ss, cs) = ((0.5 * nu + 0.25) * PI).sin_cos();
    let sin_w = sz * cs - cz * ss;
    let cos_w = cz * cs + sz * ss;
    let y = (2.0 / (PI * z)).sqrt() * (p.value.re * sin_w + q.value.re * cos_w);
    Ok(Some(y + k.value.re))
}
