//! Clausen function Cl₂(φ) = -∫₀^φ ln|2 sin(t/2)| dt.

use core::f64::consts::{PI, TAU};

use num_complex::Complex64;

use crate::algo::constants::{CF_TABLE, CLAUSEN_TWO_PI_3, TWO_PI_3};
use crate::algo::quad::Quadrature;
use crate::algo::series::sum_series;
use crate::types::{Config, Error};

/// Cl₂(φ) with the default configuration.
pub fn clausen(phi: f64) -> Result<f64, Error> {
    clausen_with(phi, &Config::default())
}

/// Cl₂(φ).
///
/// The argument is folded by oddness, reduced modulo 2π and folded onto
/// [0, π] again.
/// On [0, 2π/3] the Bernoulli series is summed; above that the integral
/// from the tabulated value at 2π/3 is evaluated by quadrature.
///
/// Non-finite `φ` yields `NaN`.
pub fn clausen_with(phi: f64, cfg: &Config) -> Result<f64, Error> {
    cfg.validate()?;
    if !phi.is_finite() {
        return Ok(f64::NAN);
    }

    // reduce |φ|; a tiny negative angle taken modulo 2π rounds up to 2π
    let r = phi.abs() % TAU;
    if r == 0.0 || r == PI {
        return Ok(0.0);
    }
    let (theta, sign) = if r > PI { (TAU - r, -1.0) } else { (r, 1.0) };
    let sign = sign * phi.signum();

    let value = if theta <= TWO_PI_3 {
        clausen_series(theta, cfg)?
    } else {
        clausen_quadrature(theta, cfg)?
    };
    Ok(sign * value)
}

/// Coefficient of θ^{2k+1}: |B_{2k}| / (2k (2k+1) (2k)!).
fn series_coefficient(k: usize) -> f64 {
    let m = 2 * k;
    let factorial: f64 = (1..=m).map(|j| j as f64).product();
    // |B_{2k}| = |CF_k| 2k(2k-1)
    CF_TABLE[k - 1].abs() * (m - 1) as f64 / ((m + 1) as f64 * factorial)
}

fn clausen_series(theta: f64, cfg: &Config) -> Result<f64, Error> {
    let t2 = theta * theta;
    let first = Complex64::new(series_coefficient(1) * theta * t2, 0.0);
    let tail = sum_series(
        first,
        |j, prev| {
            let k = j + 1;
            if k > CF_TABLE.len() {
                return Complex64::new(0.0, 0.0);
            }
            prev * t2 * (series_coefficient(k) / series_coefficient(k - 1))
        },
        cfg,
    )?;
    Ok(theta - theta * theta.ln() + tail.value.re)
}

fn clausen_quadrature(theta: f64, cfg: &Config) -> Result<f64, Error> {
    let est = Quadrature::new(cfg).integrate(|x: f64| (2.0 * (0.5 * x).sin()).ln(), TWO_PI_3, theta)?;
    Ok(CLAUSEN_TWO_PI_3 - est.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALAN: f64 = 0.915_965_594_177_219_015;
    const CL2_PI_3: f64 = 1.014_941_606_409_653_625;

    #[test]
    fn catalan_constant() {
        assert!((clausen(PI / 2.0).unwrap() - CATALAN).abs() < 2e-15);
    }

    #[test]
    fn maximum_at_pi_over_3() {
        assert!((clausen(PI / 3.0).unwrap() - CL2_PI_3).abs() < 2e-15);
        assert!((clausen(TWO_PI_3).unwrap() - CLAUSEN_TWO_PI_3).abs() < 2e-15);
    }

    #[test]
    fn zeros_at_multiples_of_pi() {
        assert_eq!(clausen(0.0).unwrap(), 0.0);
        assert_eq!(clausen(PI).unwrap(), 0.0);
        assert_eq!(clausen(-PI).unwrap(), 0.0);
        assert!(clausen(TAU).unwrap().abs() < 1e-14);
    }

    #[test]
    fn duplication_crosses_branches() {
        // Cl₂(2θ) = 2Cl₂(θ) - 2Cl₂(π-θ), with 2θ on the quadrature branch
        let theta = 0.4 * PI;
        let lhs = clausen(2.0 * theta).unwrap();
        let rhs = 2.0 * clausen(theta).unwrap() - 2.0 * clausen(PI - theta).unwrap();
        assert!((lhs - rhs).abs() < 1e-14);
    }

    #[test]
    fn odd_and_periodic() {
        for &phi in &[0.1, 1.3, 2.5, 3.0] {
            let v = clausen(phi).unwrap();
            assert!((clausen(-phi).unwrap() + v).abs() < 1e-15);
            assert!((clausen(phi + 4.0 * TAU).unwrap() - v).abs() < 1e-13);
        }
    }

    #[test]
    fn small_argument() {
        // θ - θ ln θ dominates
        let theta: f64 = 1e-8;
        let expected = theta - theta * theta.ln();
        assert!((clausen(theta).unwrap() - expected).abs() < 1e-22);
    }

    #[test]
    fn tiny_negative_argument() {
        for phi in [1e-20_f64, 1e-17, 1e-300] {
            let expected = phi - phi * phi.ln();
            let v = clausen(-phi).unwrap();
            assert!((v + expected).abs() <= 1e-15 * expected, "Cl2(-{phi}) = {v}");
        }
        assert!((clausen(-1e-20).unwrap() + 4.705_170_185_988_092e-19).abs() < 1e-33);
    }

    #[test]
    fn non_finite_is_nan() {
        assert!(clausen(f64::NAN).unwrap().is_nan());
        assert!(clausen(f64::INFINITY).unwrap().is_nan());
    }
}
