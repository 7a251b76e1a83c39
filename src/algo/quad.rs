//! Adaptive Gauss–Kronrod quadrature.
//!
//! Global adaptive strategy: each panel is integrated with the 15-point
//! Kronrod rule and its embedded 7-point Gauss rule, and the panel with the
//! largest error estimate (kept on top of a heap) is bisected until the total
//! error meets `max(tol·|I|, ROUNDOFF_FLOOR·∫|f|)` or the bisection budget
//! runs out. Starting partitions larger than `Config::max_panels` are refused
//! before any evaluation.
//!
//! Oscillatory integrands are handed an initial partition by the caller
//! (see [`Quadrature::integrate_partitioned`]) so that no starting panel
//! spans more than a bounded phase.

#![allow(clippy::excessive_precision)]

use core::cmp::Ordering;
use core::ops::{Add, Mul, Sub};
use std::collections::BinaryHeap;

use num_complex::Complex64;
use num_traits::Zero;

use crate::machine::{working_tol, ROUNDOFF_FLOOR};
use crate::types::{Config, Error};

/// Kronrod abscissae on [-1, 1]; odd indices are the Gauss points.
#[rustfmt::skip]
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

/// Kronrod weights.
#[rustfmt::skip]
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Gauss weights (the last one belongs to the centre).
#[rustfmt::skip]
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Integrand value type: `f64` or `Complex64`.
pub(crate) trait Scalar:
    Copy + Zero + Add<Output = Self> + Sub<Output = Self> + Mul<f64, Output = Self>
{
    fn magnitude(self) -> f64;
    fn to_complex(self) -> Complex64;
}

impl Scalar for f64 {
    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }
    #[inline]
    fn to_complex(self) -> Complex64 {
        Complex64::new(self, 0.0)
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn magnitude(self) -> f64 {
        self.norm()
    }
    #[inline]
    fn to_complex(self) -> Complex64 {
        self
    }
}

/// Converged integral.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Estimate<V> {
    pub value: V,
    pub error: f64,
    /// ∫|f|; `magnitude / |value|` measures cancellation inside the integral.
    pub magnitude: f64,
    pub evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Panel<V> {
    a: f64,
    b: f64,
    value: V,
    error: f64,
    abs: f64,
}

// Panels are ordered by error estimate so the heap pops the worst one.
impl<V> PartialEq for Panel<V> {
    fn eq(&self, other: &Self) -> bool {
        self.error.total_cmp(&other.error).is_eq()
    }
}

impl<V> Eq for Panel<V> {}

impl<V> PartialOrd for Panel<V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V> Ord for Panel<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.error.total_cmp(&other.error)
    }
}

/// Value, error and `∫|f|` summed over all panels.
fn totals<V: Scalar>(panels: &BinaryHeap<Panel<V>>) -> (V, f64, f64) {
    panels.iter().fold((V::zero(), 0.0, 0.0), |(v, e, a), p| {
        (v + p.value, e + p.error, a + p.abs)
    })
}

/// 15-point Kronrod rule on [a, b] with the QUADPACK error scaling.
fn gk15<V: Scalar, F: FnMut(f64) -> V>(f: &mut F, a: f64, b: f64) -> Panel<V> {
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let hlen = half.abs();

    let fc = f(centre);
    let mut resk = fc * WGK[7];
    let mut resg = fc * WG[3];
    let mut resabs = fc.magnitude() * WGK[7];

    let mut fv1 = [V::zero(); 7];
    let mut fv2 = [V::zero(); 7];
    for j in 0..7 {
        let dx = half * XGK[j];
        let f1 = f(centre - dx);
        let f2 = f(centre + dx);
        fv1[j] = f1;
        fv2[j] = f2;
        let pair = f1 + f2;
        resk = resk + pair * WGK[j];
        resabs += (f1.magnitude() + f2.magnitude()) * WGK[j];
        if j % 2 == 1 {
            resg = resg + pair * WG[j / 2];
        }
    }

    let mean = resk * 0.5;
    let mut resasc = (fc - mean).magnitude() * WGK[7];
    for j in 0..7 {
        resasc += WGK[j] * ((fv1[j] - mean).magnitude() + (fv2[j] - mean).magnitude());
    }
    resasc *= hlen;

    let mut error = (resk - resg).magnitude() * hlen;
    if resasc != 0.0 && error != 0.0 {
        error = resasc * (200.0 * error / resasc).powf(1.5).min(1.0);
    }

    Panel {
        a,
        b,
        value: resk * half,
        error,
        abs: resabs * hlen,
    }
}

/// Adaptive quadrature driver configured from a [`Config`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Quadrature {
    tol: f64,
    max_bisections: usize,
    max_panels: usize,
}

impl Quadrature {
    pub(crate) fn new(cfg: &Config) -> Self {
        Quadrature {
            tol: working_tol(cfg.tol),
            max_bisections: cfg.max_bisections,
            max_panels: cfg.max_panels,
        }
    }

    /// Number of starting panels for `pieces` (rounded up), refused when it
    /// exceeds the configured partition cap.
    pub(crate) fn panel_count(&self, pieces: f64) -> Result<usize, Error> {
        let pieces = pieces.ceil().max(1.0);
        if pieces.is_nan() || pieces > self.max_panels as f64 {
            log::debug!(
                "quadrature needs {pieces:e} starting panels, cap is {}",
                self.max_panels
            );
            return Err(Error::ConvergenceFailure {
                estimate: Complex64::new(f64::NAN, f64::NAN),
                error_bound: f64::INFINITY,
            });
        }
        Ok(pieces as usize)
    }

    /// Evenly spaced breakpoints over [a, b] for `pieces` panels, subject to
    /// the partition cap.
    pub(crate) fn uniform_partition(&self, a: f64, b: f64, pieces: f64) -> Result<Vec<f64>, Error> {
        Ok(uniform_points(a, b, self.panel_count(pieces)?))
    }

    /// ∫ₐᵇ f(t) dt. `a > b` flips the sign.
    pub(crate) fn integrate<V, F>(&self, f: F, a: f64, b: f64) -> Result<Estimate<V>, Error>
    where
        V: Scalar,
        F: FnMut(f64) -> V,
    {
        self.integrate_partitioned(f, &[a, b])
    }

    /// Integrate over `points[0]..points[last]` starting from the given
    /// panels. Points must be monotone; repeated points are skipped.
    pub(crate) fn integrate_partitioned<V, F>(
        &self,
        mut f: F,
        points: &[f64],
    ) -> Result<Estimate<V>, Error>
    where
        V: Scalar,
        F: FnMut(f64) -> V,
    {
        if points.len() < 2 {
            return Ok(Estimate {
                value: V::zero(),
                error: 0.0,
                magnitude: 0.0,
                evaluations: 0,
            });
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(Error::domain("integration limits must be finite"));
        }
        self.panel_count((points.len() - 1) as f64)?;

        let mut panels: BinaryHeap<Panel<V>> = points
            .windows(2)
            .filter(|w| w[0] != w[1])
            .map(|w| gk15(&mut f, w[0], w[1]))
            .collect();
        let mut evaluations = 15 * panels.len();
        let mut bisections = 0usize;
        let (mut value, mut error, mut abs) = totals(&panels);

        loop {
            if !value.magnitude().is_finite() {
                return Err(Error::ConvergenceFailure {
                    estimate: value.to_complex(),
                    error_bound: f64::INFINITY,
                });
            }

            let mut target = (self.tol * value.magnitude()).max(ROUNDOFF_FLOOR * abs);
            if error <= target {
                // running sums drift; settle on exact ones
                (value, error, abs) = totals(&panels);
                target = (self.tol * value.magnitude()).max(ROUNDOFF_FLOOR * abs);
                if error <= target {
                    log::trace!(
                        "quadrature converged: {} panels, {} evaluations, error {:e}",
                        panels.len(),
                        evaluations,
                        error
                    );
                    return Ok(Estimate {
                        value,
                        error,
                        magnitude: abs,
                        evaluations,
                    });
                }
            }

            let Some(p) = panels.pop() else {
                return Err(Error::ConvergenceFailure {
                    estimate: value.to_complex(),
                    error_bound: error,
                });
            };

            let mid = 0.5 * (p.a + p.b);
            let splittable = (p.a < mid && mid < p.b) || (p.b < mid && mid < p.a);
            if bisections >= self.max_bisections || !splittable {
                log::debug!(
                    "quadrature budget exhausted after {} bisections: error {:e} > target {:e}",
                    bisections,
                    error,
                    target
                );
                return Err(Error::ConvergenceFailure {
                    estimate: value.to_complex(),
                    error_bound: error,
                });
            }

            let left = gk15(&mut f, p.a, mid);
            let right = gk15(&mut f, mid, p.b);
            value = value - p.value + left.value + right.value;
            error += left.error + right.error - p.error;
            abs += left.abs + right.abs - p.abs;
            panels.push(left);
            panels.push(right);
            evaluations += 30;
            bisections += 1;
        }
    }

    /// ∫ₐ^∞ f(t) dt via `t = a + u/(1-u)`, `dt = du/(1-u)²`.
    pub(crate) fn integrate_to_infinity<V, F>(&self, mut f: F, a: f64) -> Result<Estimate<V>, Error>
    where
        V: Scalar,
        F: FnMut(f64) -> V,
    {
        let mapped = |u: f64| {
            let w = 1.0 - u;
            let t = a + u / w;
            let jac = 1.0 / (w * w);
            if !t.is_finite() || !jac.is_finite() {
                return V::zero();
            }
            let v = f(t);
            if v.magnitude() == 0.0 {
                V::zero()
            } else {
                v * jac
            }
        };
        self.integrate(mapped, 0.0, 1.0)
    }
}

/// Evenly spaced breakpoints `a = p₀ < … < pₙ = b`.
pub(crate) fn uniform_points(a: f64, b: f64, pieces: usize) -> Vec<f64> {
    let n = pieces.max(1);
    let h = (b - a) / n as f64;
    let mut points: Vec<f64> = (0..n).map(|k| a + h * k as f64).collect();
    points.push(b);
    points
}
