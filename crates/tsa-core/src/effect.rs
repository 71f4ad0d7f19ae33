//! Study-level odds ratio with conditional continuity correction.

use serde::{Deserialize, Serialize};

use crate::constants::CONTINUITY_CORRECTION;
use crate::math;
use crate::types::Study;

/// Effect estimate of a single study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudyEffect {
    /// Odds ratio (treatment vs control).
    pub odds_ratio: f64,
    /// Natural log of the odds ratio.
    pub log_odds_ratio: f64,
    /// Standard error of the log odds ratio.
    pub standard_error: f64,
    /// Inverse-variance weight, 1 / SE².
    pub weight: f64,
    /// Whether 0.5 was added to every cell.
    pub continuity_corrected: bool,
}

/// The four cells of a study's 2×2 table as floats.
///
/// `a`/`b` are treatment events/non-events, `c`/`d` control events/non-events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cells {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Cells {
    /// Raw counts, no correction.
    pub(crate) fn raw(study: &Study) -> Self {
        Self {
            a: study.events_treatment as f64,
            b: study.total_treatment.saturating_sub(study.events_treatment) as f64,
            c: study.events_control as f64,
            d: study.total_control.saturating_sub(study.events_control) as f64,
        }
    }

    fn has_zero(&self) -> bool {
        self.a == 0.0 || self.b == 0.0 || self.c == 0.0 || self.d == 0.0
    }

    fn shifted(&self, k: f64) -> Self {
        Self {
            a: self.a + k,
            b: self.b + k,
            c: self.c + k,
            d: self.d + k,
        }
    }
}

/// Odds ratio, SE of its log, and inverse-variance weight for one study.
///
/// If any cell is zero, 0.5 is added to all four cells; otherwise the raw
/// counts are used. The correction is never applied to a subset of cells.
pub fn study_effect(study: &Study) -> StudyEffect {
    let raw = Cells::raw(study);
    let continuity_corrected = raw.has_zero();
    let cells = if continuity_corrected {
        raw.shifted(CONTINUITY_CORRECTION)
    } else {
        raw
    };

    let odds_ratio = (cells.a * cells.d) / (cells.b * cells.c);
    let variance = 1.0 / cells.a + 1.0 / cells.b + 1.0 / cells.c + 1.0 / cells.d;
    let standard_error = math::sqrt(variance);

    StudyEffect {
        odds_ratio,
        log_odds_ratio: math::ln(odds_ratio),
        standard_error,
        weight: 1.0 / variance,
        continuity_corrected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn study(et: u64, nt: u64, ec: u64, nc: u64) -> Study {
        Study::new("s", "S", 2000, et, nt, ec, nc)
    }

    #[test]
    fn test_uncorrected_effect() {
        let e = study_effect(&study(20, 100, 30, 100));
        assert!(!e.continuity_corrected);
        // (20·70)/(80·30)
        assert!((e.odds_ratio - 1400.0 / 2400.0).abs() < 1e-12);
        let var: f64 = 1.0 / 20.0 + 1.0 / 80.0 + 1.0 / 30.0 + 1.0 / 70.0;
        assert!((e.standard_error - var.sqrt()).abs() < 1e-12);
        assert!((e.weight - 1.0 / var).abs() < 1e-9);
        assert!((e.log_odds_ratio - e.odds_ratio.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_single_zero_cell_is_corrected() {
        let e = study_effect(&study(0, 50, 10, 50));
        assert!(e.continuity_corrected);
        assert!(e.odds_ratio.is_finite() && e.odds_ratio < 1.0);
        assert!(e.standard_error.is_finite());
        // (0.5·40.5)/(50.5·10.5)
        assert!((e.odds_ratio - (0.5 * 40.5) / (50.5 * 10.5)).abs() < 1e-12);
    }

    #[test]
    fn test_double_zero_is_finite() {
        let e = study_effect(&study(0, 50, 0, 50));
        assert!(e.continuity_corrected);
        assert!((e.odds_ratio - 1.0).abs() < 1e-12);
        assert!(e.standard_error.is_finite());
    }

    #[test]
    fn test_all_events_corrected() {
        // b = 0 and d = 0 (every patient had the event)
        let e = study_effect(&study(30, 30, 25, 25));
        assert!(e.continuity_corrected);
        assert!(e.odds_ratio.is_finite());
        assert!(e.weight > 0.0);
    }

    #[test]
    fn test_correction_is_all_or_nothing() {
        // One zero cell shifts all four cells, not just the zero one
        let e = study_effect(&study(5, 5, 2, 10));
        let expected = (5.5 * 8.5) / (0.5 * 2.5);
        assert!((e.odds_ratio - expected).abs() < 1e-9);
    }
}
