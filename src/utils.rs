//! Small real/complex arithmetic helpers shared by the evaluators.

use num_complex::Complex64;

/// Multiply a complex number by i: (a+bi)·i = -b+ai.
#[inline]
pub(crate) fn mul_i(c: Complex64) -> Complex64 {
    Complex64::new(-c.im, c.re)
}

/// Multiply a complex number by -i: (a+bi)·(-i) = b-ai.
#[inline]
pub(crate) fn mul_neg_i(c: Complex64) -> Complex64 {
    Complex64::new(c.im, -c.re)
}

/// Compute sin(π·x) with exact values at integers and half-integers.
///
/// Reduces the argument modulo 2 first, so `sinpi(n)` is exactly 0 for
/// any integer `n`. Reflection formulas evaluated at poles depend on this.
#[inline]
pub(crate) fn sinpi(x: f64) -> f64 {
    use core::f64::consts::PI;

    // sinpi is odd
    let (ax, sign) = if x < 0.0 { (-x, -1.0) } else { (x, 1.0) };
    let r = ax % 2.0;

    if r == 0.0 || r == 1.0 {
        return 0.0;
    }
    if r == 0.5 {
        return sign;
    }
    if r == 1.5 {
        return -sign;
    }

    // reduce to [0, 0.5]
    let s = if r < 0.5 {
        (r * PI).sin()
    } else if r < 1.0 {
        ((1.0 - r) * PI).sin()
    } else if r < 1.5 {
        -((r - 1.0) * PI).sin()
    } else {
        -((2.0 - r) * PI).sin()
    };

    sign * s
}

/// Compute cos(π·x) with exact values at integers and half-integers.
#[inline]
pub(crate) fn cospi(x: f64) -> f64 {
    use core::f64::consts::PI;

    let r = x.abs() % 2.0;

    if r == 0.0 {
        return 1.0;
    }
    if r == 0.5 || r == 1.5 {
        return 0.0;
    }
    if r == 1.0 {
        return -1.0;
    }

    if r < 0.5 {
        (r * PI).cos()
    } else if r < 1.0 {
        -((1.0 - r) * PI).cos()
    } else if r < 1.5 {
        -((r - 1.0) * PI).cos()
    } else {
        ((2.0 - r) * PI).cos()
    }
}

/// `Some(n)` when `z` is exactly the non-positive integer `-n`.
#[inline]
pub(crate) fn nonpositive_integer(z: Complex64) -> Option<u64> {
    if z.im == 0.0 && z.re <= 0.0 && z.re == z.re.round() && z.re > -9.0e15 {
        Some((-z.re) as u64)
    } else {
        None
    }
}

/// `Some(n)` when `z` is exactly the positive integer `n`.
#[inline]
pub(crate) fn positive_integer(z: Complex64) -> Option<u64> {
    if z.im == 0.0 && z.re >= 1.0 && z.re == z.re.round() && z.re < 9.0e15 {
        Some(z.re as u64)
    } else {
        None
    }
}
