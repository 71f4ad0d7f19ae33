//! Mantel-Haenszel pooled odds ratio with Robins-Breslow-Greenland variance.
//!
//! For each informative study (at least one event in either arm), with raw
//! counts a, b, c, d and n = a + b + c + d:
//! ```text
//! R += a·d/n      S += b·c/n
//! P  = (a+d)/n    Q  = (b+c)/n
//! ΣPR, Σ(PS+QR), ΣQS
//!
//! OR_MH      = R / S
//! Var(ln OR) = ΣPR/(2R²) + Σ(PS+QR)/(2RS) + ΣQS/(2S²)
//! ```
//! No continuity correction is applied here; the RBG estimator is valid with
//! zero cells as long as R and S are both positive.

use serde::{Deserialize, Serialize};

use crate::constants::CONFIDENCE_LEVEL;
use crate::effect::Cells;
use crate::math::{self, normal_quantile, sq};
use crate::types::Study;

/// Pooled fixed-effect estimate over a prefix of studies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PooledEffect {
    /// Mantel-Haenszel odds ratio (1 when undefined).
    pub odds_ratio: f64,
    /// Natural log of the pooled odds ratio.
    pub log_odds_ratio: f64,
    /// RBG standard error of the log odds ratio; +∞ when uninformative.
    pub standard_error: f64,
    /// Lower bound of the 95% confidence interval for the odds ratio.
    pub ci_lower: f64,
    /// Upper bound of the 95% confidence interval for the odds ratio.
    pub ci_upper: f64,
    /// Studies that entered the Mantel-Haenszel sums.
    pub studies_pooled: usize,
}

impl PooledEffect {
    /// Whether the pool carries any information (finite, positive SE).
    pub fn is_informative(&self) -> bool {
        self.standard_error.is_finite() && self.standard_error > 0.0
    }

    /// Wald Z statistic ln(OR)/SE, or 0 for an uninformative pool.
    pub fn z_statistic(&self) -> f64 {
        if self.is_informative() {
            self.log_odds_ratio / self.standard_error
        } else {
            0.0
        }
    }
}

/// Running Mantel-Haenszel sums.
///
/// Studies are folded in the order they are pushed; the sequential driver
/// pushes one study per look instead of re-pooling the whole prefix, and the
/// one-shot [`mantel_haenszel`] goes through the same accumulator so both
/// paths round identically.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MantelHaenszel {
    r: f64,
    s: f64,
    pr: f64,
    ps_qr: f64,
    qs: f64,
    studies: usize,
}

impl MantelHaenszel {
    /// Empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one study into the sums. Double-zero studies are skipped.
    pub fn push(&mut self, study: &Study) {
        if study.is_double_zero() {
            return;
        }
        let Cells { a, b, c, d } = Cells::raw(study);
        let n = a + b + c + d;
        if n <= 0.0 {
            return;
        }

        let r = a * d / n;
        let s = b * c / n;
        let p = (a + d) / n;
        let q = (b + c) / n;

        self.r += r;
        self.s += s;
        self.pr += p * r;
        self.ps_qr += p * s + q * r;
        self.qs += q * s;
        self.studies += 1;
    }

    /// Number of studies that entered the sums.
    pub fn studies(&self) -> usize {
        self.studies
    }

    /// Pooled estimate from the current sums.
    pub fn estimate(&self) -> PooledEffect {
        let odds_ratio = if self.s > 0.0 { self.r / self.s } else { 1.0 };

        let variance = if self.r > 0.0 && self.s > 0.0 {
            self.pr / (2.0 * sq(self.r))
                + self.ps_qr / (2.0 * self.r * self.s)
                + self.qs / (2.0 * sq(self.s))
        } else {
            f64::INFINITY
        };

        let log_odds_ratio = math::ln(odds_ratio);
        let standard_error = math::sqrt(variance);

        // An uninformative pool spans every odds ratio
        let (ci_lower, ci_upper) = if standard_error.is_finite() {
            let z = normal_quantile(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
            (
                math::exp(log_odds_ratio - z * standard_error),
                math::exp(log_odds_ratio + z * standard_error),
            )
        } else {
            (0.0, f64::INFINITY)
        };

        PooledEffect {
            odds_ratio,
            log_odds_ratio,
            standard_error,
            ci_lower,
            ci_upper,
            studies_pooled: self.studies,
        }
    }
}

/// Mantel-Haenszel pooled odds ratio over `studies`, in order.
///
/// An empty slice, or one containing only double-zero studies, yields
/// OR = 1 with SE = +∞.
pub fn mantel_haenszel(studies: &[Study]) -> PooledEffect {
    let mut acc = MantelHaenszel::new();
    for study in studies {
        acc.push(study);
    }
    acc.estimate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(et: u64, nt: u64, ec: u64, nc: u64) -> Study {
        Study::new("s", "S", 2000, et, nt, ec, nc)
    }

    fn two_study_set() -> [Study; 2] {
        [study(20, 100, 30, 100), study(15, 80, 25, 80)]
    }

    #[test]
    fn test_two_study_pool_favors_treatment() {
        let pooled = mantel_haenszel(&two_study_set());
        assert!(pooled.odds_ratio < 1.0, "OR = {}", pooled.odds_ratio);
        assert!(pooled.odds_ratio > 0.3, "OR = {}", pooled.odds_ratio);
        assert!(pooled.standard_error.is_finite());
        assert!(pooled.ci_lower < pooled.odds_ratio && pooled.odds_ratio < pooled.ci_upper);
        assert_eq!(pooled.studies_pooled, 2);
        assert!(pooled.z_statistic() < 0.0);
    }

    #[test]
    fn test_single_study_matches_hand_computation() {
        let pooled = mantel_haenszel(&[study(20, 100, 30, 100)]);
        // R = 20·70/200, S = 80·30/200
        assert!((pooled.odds_ratio - (1400.0 / 2400.0)).abs() < 1e-12);
        // For one stratum RBG reduces to Woolf's 1/a + 1/b + 1/c + 1/d
        let woolf: f64 = 1.0 / 20.0 + 1.0 / 80.0 + 1.0 / 30.0 + 1.0 / 70.0;
        assert!((pooled.standard_error - woolf.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_pool() {
        let pooled = mantel_haenszel(&[]);
        assert_eq!(pooled.odds_ratio, 1.0);
        assert_eq!(pooled.log_odds_ratio, 0.0);
        assert_eq!(pooled.standard_error, f64::INFINITY);
        assert_eq!(pooled.studies_pooled, 0);
        assert!(!pooled.is_informative());
        assert_eq!(pooled.z_statistic(), 0.0);
    }

    #[test]
    fn test_double_zero_excluded() {
        let with = mantel_haenszel(&[study(20, 100, 30, 100), study(0, 50, 0, 50)]);
        let without = mantel_haenszel(&[study(20, 100, 30, 100)]);
        assert_eq!(with, without);
        assert_eq!(with.studies_pooled, 1);
    }

    #[test]
    fn test_all_double_zero_is_uninformative() {
        let pooled = mantel_haenszel(&[study(0, 50, 0, 50), study(0, 30, 0, 30)]);
        assert_eq!(pooled.odds_ratio, 1.0);
        assert_eq!(pooled.standard_error, f64::INFINITY);
        assert_eq!(pooled.studies_pooled, 0);
    }

    #[test]
    fn test_single_zero_cell_raw_counts() {
        // a = 0 → R = 0: OR is 0 and the variance is undefined
        let pooled = mantel_haenszel(&[study(0, 50, 10, 50)]);
        assert_eq!(pooled.odds_ratio, 0.0);
        assert_eq!(pooled.standard_error, f64::INFINITY);
        assert_eq!(pooled.studies_pooled, 1);
        assert_eq!(pooled.z_statistic(), 0.0);
        assert_eq!((pooled.ci_lower, pooled.ci_upper), (0.0, f64::INFINITY));
    }

    #[test]
    fn test_zero_cell_rescued_by_other_strata() {
        let pooled = mantel_haenszel(&[study(0, 50, 10, 50), study(12, 60, 20, 60)]);
        assert!(pooled.odds_ratio > 0.0 && pooled.odds_ratio < 1.0);
        assert!(pooled.is_informative());
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let studies = [
            study(20, 100, 30, 100),
            study(0, 40, 0, 40),
            study(15, 80, 25, 80),
            study(3, 30, 9, 31),
        ];
        let mut acc = MantelHaenszel::new();
        for (i, s) in studies.iter().enumerate() {
            acc.push(s);
            assert_eq!(acc.estimate(), mantel_haenszel(&studies[..=i]));
        }
        assert_eq!(acc.studies(), 3);
    }
}
