//! Required information size (RIS) for a binary-outcome meta-analysis.
//!
//! ```text
//! p₁        = p₀ · (1 − RRR/100)
//! OR        = [p₁/(1−p₁)] / [p₀/(1−p₀)]
//! n per arm = (z_{α/2} + z_β)² · [1/(p₁(1−p₁)) + 1/(p₀(1−p₀))] / ln(OR)²
//! RIS       = ⌈2 · n per arm · h⌉
//! ```
//! Designs that cannot be sized return [`RIS_SENTINEL`] instead of failing.

use crate::constants::{MIN_LOG_ODDS_RATIO, RIS_SENTINEL};
use crate::math::{self, normal_quantile, sq};
use crate::types::DesignParameters;

/// Total patients (both arms) needed to detect the anticipated effect.
///
/// Returns [`RIS_SENTINEL`] when either event rate falls outside (0, 1), when
/// the anticipated log odds ratio is smaller than 0.001 in magnitude, or when
/// the formula does not produce a finite positive size.
pub fn required_information_size(params: &DesignParameters) -> u64 {
    let p0 = params.control_rate;
    let p1 = params.treatment_rate();
    if !in_unit_interval(p0) || !in_unit_interval(p1) {
        return RIS_SENTINEL;
    }

    let odds_ratio = (p1 / (1.0 - p1)) / (p0 / (1.0 - p0));
    let log_or = math::ln(odds_ratio);
    if !(math::abs(log_or) >= MIN_LOG_ODDS_RATIO) {
        return RIS_SENTINEL;
    }

    let z_alpha = normal_quantile(1.0 - params.alpha / 2.0);
    let z_beta = normal_quantile(1.0 - params.beta);
    let variance = 1.0 / (p1 * (1.0 - p1)) + 1.0 / (p0 * (1.0 - p0));
    let per_arm = sq(z_alpha + z_beta) * variance / sq(log_or);

    let ris = math::ceil(2.0 * per_arm * params.heterogeneity_correction);
    if ris.is_finite() && ris >= 1.0 {
        ris as u64
    } else {
        RIS_SENTINEL
    }
}

/// Inflate a required information size by 1 / (1 − I²) for the observed
/// heterogeneity.
///
/// `i2_percent` is on the 0–100 scale. Non-positive I² leaves `ris`
/// unchanged; I² of 100 or more (or NaN) has no finite adjustment and yields
/// the larger of `ris` and [`RIS_SENTINEL`]. The result is never below `ris`.
pub fn i2_adjusted_information_size(ris: u64, i2_percent: f64) -> u64 {
    if i2_percent.is_nan() || i2_percent >= 100.0 {
        return ris.max(RIS_SENTINEL);
    }
    if i2_percent <= 0.0 {
        return ris;
    }
    let adjusted = math::ceil(ris as f64 / (1.0 - i2_percent / 100.0));
    if adjusted.is_finite() {
        (adjusted as u64).max(ris)
    } else {
        ris.max(RIS_SENTINEL)
    }
}

fn in_unit_interval(p: f64) -> bool {
    p > 0.0 && p < 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(control_rate: f64, rrr: f64, h: f64) -> DesignParameters {
        DesignParameters {
            alpha: 0.05,
            beta: 0.20,
            control_rate,
            relative_risk_reduction: rrr,
            heterogeneity_correction: h,
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_design() {
        // p₀ = 0.10, RRR = 30%: n per arm ≈ 1369.6
        let ris = required_information_size(&params(0.10, 30.0, 1.0));
        assert!((2730..=2750).contains(&ris), "RIS = {}", ris);
    }

    #[test]
    fn test_smaller_effect_needs_more_patients() {
        let large = required_information_size(&params(0.10, 30.0, 1.0));
        let small = required_information_size(&params(0.10, 25.0, 1.0));
        assert!(large < small, "RRR 30% -> {}, RRR 25% -> {}", large, small);
    }

    #[test]
    fn test_scales_with_heterogeneity_correction() {
        let base = required_information_size(&params(0.10, 30.0, 1.0)) as f64;
        let inflated = required_information_size(&params(0.10, 30.0, 1.5)) as f64;
        // Both sides are ceilings, so allow a couple of patients of slack
        assert!((inflated - 1.5 * base).abs() <= 2.0, "{} vs {}", inflated, base);
    }

    #[test]
    fn test_degenerate_designs_return_sentinel() {
        assert_eq!(required_information_size(&params(0.0, 30.0, 1.0)), RIS_SENTINEL);
        assert_eq!(required_information_size(&params(1.0, 30.0, 1.0)), RIS_SENTINEL);
        // RRR of 100% drives p₁ to 0
        assert_eq!(required_information_size(&params(0.10, 100.0, 1.0)), RIS_SENTINEL);
        // No anticipated effect
        assert_eq!(required_information_size(&params(0.10, 0.0, 1.0)), RIS_SENTINEL);
        assert_eq!(required_information_size(&params(0.10, 0.005, 1.0)), RIS_SENTINEL);
    }

    #[test]
    fn test_harmful_effect_is_sized() {
        // Negative RRR (anticipated harm) still has |ln OR| well above the floor
        let ris = required_information_size(&params(0.10, -30.0, 1.0));
        assert!(ris > 0 && ris < RIS_SENTINEL);
    }

    #[test]
    fn test_i2_adjustment() {
        assert_eq!(i2_adjusted_information_size(1000, 0.0), 1000);
        assert_eq!(i2_adjusted_information_size(1000, -5.0), 1000);
        assert_eq!(i2_adjusted_information_size(1000, 50.0), 2000);
        assert_eq!(i2_adjusted_information_size(1000, 75.0), 4000);
        assert_eq!(i2_adjusted_information_size(1000, 100.0), RIS_SENTINEL);
        assert_eq!(i2_adjusted_information_size(1000, f64::NAN), RIS_SENTINEL);
        assert_eq!(i2_adjusted_information_size(250_000, 100.0), 250_000);
    }
}
