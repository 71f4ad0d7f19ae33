//! Math functions for no_std compatibility, plus the special functions the
//! sequential engine is built on.
//!
//! In no_std mode, f64 doesn't have transcendental methods like sqrt, ln, exp,
//! etc. The thin wrappers at the top of this module route through libm so the
//! rest of the crate never calls the inherent methods directly.
//!
//! The normal CDF uses the A&S polynomial erf rather than `libm::erf`. Traces
//! must reproduce bit-for-bit, so the approximation is part of the output.

use core::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::constants::{GAMMA_EPSILON, GAMMA_MAX_ITERATIONS};

/// Square root.
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Natural logarithm.
#[inline]
pub fn ln(x: f64) -> f64 {
    libm::log(x)
}

/// Exponential (e^x).
#[inline]
pub fn exp(x: f64) -> f64 {
    libm::exp(x)
}

/// Sine.
#[inline]
pub fn sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Ceiling (round up).
#[inline]
pub fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Square (x^2).
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

/// Absolute value.
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

// ============================================================================
// Normal distribution
// ============================================================================

/// Error function, Abramowitz & Stegun 7.1.26.
///
/// Maximum absolute error is about 1.5×10⁻⁷.
fn erf(x: f64) -> f64 {
    const P: f64 = 0.327_591_1;
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = abs(x);

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;

    sign * (1.0 - poly * exp(-x * x))
}

/// Standard normal CDF: Φ(x) = (1 + erf(x/√2)) / 2
///
/// Converges to exactly 0 and 1 at −∞ and +∞.
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x * FRAC_1_SQRT_2))
}

/// Inverse standard normal CDF (probit function), Φ⁻¹(p).
///
/// Uses Acklam's rational approximation, relative error ~1.15×10⁻⁹ over the
/// open unit interval. Returns −∞ for `p <= 0`, +∞ for `p >= 1`, and exactly
/// `0.0` for `p == 0.5`.
pub fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const P_LOW: f64 = 0.024_25;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    if p == 0.5 {
        return 0.0;
    }

    if p < P_LOW {
        let q = sqrt(-2.0 * ln(p));
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = sqrt(-2.0 * ln(1.0 - p));
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

// ============================================================================
// Gamma family
// ============================================================================

/// Natural log of the gamma function.
///
/// Lanczos approximation (g = 7, 9 coefficients) with the reflection formula
/// for `x < 0.5`. Only meaningful for `x > 0`; non-positive integers are
/// poles and return +∞ or NaN.
pub fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_571_6e-6,
        1.505_632_735_149_311_6e-7,
    ];
    // ln(sqrt(2π))
    const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

    if x < 0.5 {
        // Γ(x)Γ(1−x) = π / sin(πx)
        return ln(PI / abs(sin(PI * x))) - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut a = COEFFS[0];
    for (i, &c) in COEFFS.iter().enumerate().skip(1) {
        a += c / (x + i as f64);
    }
    let t = x + G + 0.5;

    LN_SQRT_2PI + (x + 0.5) * ln(t) - t + ln(a)
}

/// Regularized lower incomplete gamma function P(a, x).
///
/// Series expansion for `x < a + 1`, Lentz continued fraction otherwise.
/// Both iterate to a relative tolerance of [`GAMMA_EPSILON`] or at most
/// [`GAMMA_MAX_ITERATIONS`] terms, whichever comes first. Returns 0 for
/// `x <= 0` or `a <= 0`; the result is clamped to [0, 1].
pub fn gamma_p(a: f64, x: f64) -> f64 {
    if x <= 0.0 || a <= 0.0 {
        return 0.0;
    }
    let p = if x < a + 1.0 {
        gamma_series(a, x)
    } else {
        1.0 - gamma_continued_fraction(a, x)
    };
    p.clamp(0.0, 1.0)
}

/// Series representation of P(a, x).
fn gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut del = 1.0 / a;
    let mut sum = del;

    for _ in 0..GAMMA_MAX_ITERATIONS {
        ap += 1.0;
        del *= x / ap;
        sum += del;
        if abs(del) < abs(sum) * GAMMA_EPSILON {
            break;
        }
    }

    sum * exp(-x + a * ln(x) - ln_gamma(a))
}

/// Continued-fraction representation of Q(a, x) = 1 − P(a, x).
fn gamma_continued_fraction(a: f64, x: f64) -> f64 {
    const FPMIN: f64 = 1e-300;

    let mut b = x + 1.0 - a;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;

    for i in 1..=GAMMA_MAX_ITERATIONS {
        let i = i as f64;
        let an = -i * (i - a);
        b += 2.0;
        d = an * d + b;
        if abs(d) < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if abs(c) < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if abs(del - 1.0) < GAMMA_EPSILON {
            break;
        }
    }

    exp(-x + a * ln(x) - ln_gamma(a)) * h
}

/// Chi-squared CDF: P(X ≤ x) for X ~ χ²(df).
///
/// Returns 0 for `x <= 0` or `df <= 0`.
pub fn chi_squared_cdf(x: f64, df: f64) -> f64 {
    if x <= 0.0 || df <= 0.0 {
        return 0.0;
    }
    gamma_p(df / 2.0, x / 2.0)
}
