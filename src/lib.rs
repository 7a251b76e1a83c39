//! Pure Rust special functions for wave problems: Clausen, Debye, Coulomb
//! wave functions, Struve, Fresnel integrals and the confluent
//! hypergeometric family ₀F₁, ₁F₁ and U.
//!
//! Every evaluator picks among a convergent series, an asymptotic expansion,
//! adaptive quadrature of an integral representation, or a closed form through
//! the complex gamma and error functions, and aims at a relative accuracy of
//! [`Config::tol`] (default `1e-15`).
//!
//! # Quick start
//!
//! ```
//! use num_complex::Complex64;
//! use special_waves::{clausen, hyp1f1, regular_coulomb};
//!
//! // Catalan's constant
//! let g = clausen(core::f64::consts::FRAC_PI_2).unwrap();
//! assert!((g - 0.915_965_594_177_219_015).abs() < 1e-14);
//!
//! let m = hyp1f1(1.0, 2.0, Complex64::new(1.0, 0.0)).unwrap();
//! assert!((m.re - (core::f64::consts::E - 1.0)).abs() < 1e-14);
//!
//! let f = regular_coulomb(0, 0.0, 1.2).unwrap();
//! assert!((f - 1.2_f64.sin()).abs() < 1e-13);
//! ```
//!
//! # Configuration
//!
//! Each function has a `_with` variant taking a [`Config`]:
//!
//! ```
//! use special_waves::{struve_with, Config};
//!
//! let cfg = Config::default().with_tol(1e-10);
//! let h = struve_with(0.0, 1.0, &cfg).unwrap();
//! assert!((h - 0.568_656_627_048_288).abs() < 1e-9);
//! ```
//!
//! # Errors
//!
//! All fallible functions return [`Error`]: [`Error::Domain`] for inputs
//! outside the function's domain, [`Error::ConvergenceFailure`] with the best
//! estimate when a kernel exhausts its budget, and [`Error::DivergentSeries`]
//! for parameters on a pole of the defining series.
//!
//! # Logging
//!
//! Regime fallbacks are reported through the [`log`] facade at `debug`,
//! kernel convergence at `trace`, and failed consistency checks at `warn`.
//! No logger is installed by the library.

pub(crate) mod algo;
pub mod clausen;
pub mod coulomb;
pub mod debye;
pub mod fresnel;
pub mod gamma;
pub mod hypergeometric;
pub mod machine;
pub mod struve;
pub mod types;
pub(crate) mod utils;

pub use types::{Config, Error, Regime};

// ── Elementary functions ──

pub use clausen::{clausen, clausen_with};
pub use debye::{debye, debye_with};
pub use fresnel::{
    fresnel_c_erf, fresnel_c_integral, fresnel_c_integral_with, fresnel_c_pi, fresnel_c_pi_with,
    fresnel_s_erf, fresnel_s_integral, fresnel_s_integral_with, fresnel_s_pi, fresnel_s_pi_with,
};
pub use struve::{struve, struve_with};

// ── Gamma and error function ──

pub use gamma::{digamma, erf, gamma, ln_gamma, ln_gamma_real, rgamma};

// ── Hypergeometric functions ──

pub use hypergeometric::{hyp0f1, hyp0f1_with, hyp1f1, hyp1f1_with, hyp_u, hyp_u_with};

// ── Coulomb wave functions ──

pub use coulomb::{
    classify, coulomb_cross, coulomb_fg, coulomb_fg_with, coulomb_h_minus, coulomb_h_minus_with,
    coulomb_h_plus, coulomb_h_plus_with, coulomb_in_regime, coulomb_normalization, coulomb_phase,
    coulomb_phase_shift, irregular_coulomb, irregular_coulomb_approx, irregular_coulomb_limit,
    irregular_coulomb_with, regular_coulomb, regular_coulomb_approx, regular_coulomb_limit,
    regular_coulomb_with,
};
