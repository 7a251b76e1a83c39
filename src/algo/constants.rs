//! Shared numeric constants used by multiple algorithm modules.
//!
//! Module-specific constants remain in their respective files.

#![allow(clippy::excessive_precision)]
#![allow(clippy::approx_constant)]

/// ln(2π)/2
pub(crate) const HALF_LN_2PI: f64 = 9.18938533204672742e-01;

/// ln(π)
pub(crate) const LN_PI: f64 = 1.14472988584940017e+00;

/// √π
pub(crate) const SQRT_PI: f64 = 1.77245385090551603e+00;

/// √(π/2)
pub(crate) const SQRT_HALF_PI: f64 = 1.25331413731550025e+00;

/// 2π/3, the Clausen series/quadrature switch point.
pub(crate) const TWO_PI_3: f64 = 2.09439510239319549e+00;

/// Cl₂(2π/3) = (2/3)·Cl₂(π/3).
pub(crate) const CLAUSEN_TWO_PI_3: f64 = 6.76627737606435750e-01;

/// Coefficients of the Stirling series for ln(Γ(z)).
///
/// Related to the Bernoulli numbers by
///   CF(k) = B_{2k} / (2k * (2k-1))
/// for k = 1, 2, ..., 22.
#[rustfmt::skip]
pub(crate) const CF_TABLE: [f64; 22] = [
     8.33333333333333333e-02,   // B2/(1*2)    = 1/12
    -2.77777777777777778e-03,   // B4/(3*4)    = -1/360
     7.93650793650793651e-04,   // B6/(5*6)
    -5.95238095238095238e-04,   // B8/(7*8)
     8.41750841750841751e-04,   // B10/(9*10)
    -1.91752691752691753e-03,   // B12/(11*12)
     6.41025641025641026e-03,   // B14/(13*14)
    -2.95506535947712418e-02,   // B16/(15*16)
     1.79644372368830573e-01,   // B18/(17*18)
    -1.39243221690590112e+00,   // B20/(19*20)
     1.34028640441683920e+01,   // B22/(21*22)
    -1.56848284626002017e+02,
     2.19310333333333333e+03,
    -3.61087712537249894e+04,
     6.91472268851313067e+05,
    -1.52382215394074162e+07,
     3.82900751391414141e+08,
    -1.08822660357843911e+10,
     3.47320283765002252e+11,
    -1.23696021422692745e+13,
     4.88788064793079335e+14,
    -2.13203339609193739e+16,
];

/// Bernoulli number B_{2k}, k = 1..=22.
#[inline]
pub(crate) fn bernoulli_2k(k: usize) -> f64 {
    let m = 2.0 * k as f64;
    CF_TABLE[k - 1] * m * (m - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bernoulli_values() {
        assert!((bernoulli_2k(1) - 1.0 / 6.0).abs() < 1e-16);
        assert!((bernoulli_2k(2) + 1.0 / 30.0).abs() < 1e-16);
        assert!((bernoulli_2k(3) - 1.0 / 42.0).abs() < 1e-16);
        assert!((bernoulli_2k(6) + 691.0 / 2730.0).abs() < 1e-15);
    }

    #[test]
    fn derived_constants() {
        use core::f64::consts::PI;
        assert!((HALF_LN_2PI - 0.5 * (2.0 * PI).ln()).abs() < 1e-16);
        assert!((LN_PI - PI.ln()).abs() < 1e-15);
        assert!((SQRT_PI - PI.sqrt()).abs() < 1e-15);
        assert!((SQRT_HALF_PI - (PI / 2.0).sqrt()).abs() < 1e-15);
        assert!((TWO_PI_3 - 2.0 * PI / 3.0).abs() < 1e-15);
    }
}
