//! Between-study heterogeneity: Cochran's Q, I², and the DerSimonian-Laird τ².

use serde::{Deserialize, Serialize};

use crate::effect::study_effect;
use crate::math::{chi_squared_cdf, sq};
use crate::pooling::mantel_haenszel;
use crate::types::Study;

/// Heterogeneity statistics over a study list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeterogeneityStats {
    /// Cochran's Q.
    pub q: f64,
    /// Degrees of freedom (studies − 1, or 0 with fewer than two studies).
    pub df: usize,
    /// I² in percent, clamped to [0, 100].
    pub i_squared: f64,
    /// DerSimonian-Laird between-study variance.
    pub tau_squared: f64,
    /// Upper-tail chi-squared p-value of Q.
    pub p_value: f64,
}

impl HeterogeneityStats {
    /// Statistics for a list with no detectable heterogeneity.
    pub const fn none() -> Self {
        Self {
            q: 0.0,
            df: 0,
            i_squared: 0.0,
            tau_squared: 0.0,
            p_value: 1.0,
        }
    }
}

impl Default for HeterogeneityStats {
    fn default() -> Self {
        Self::none()
    }
}

/// Heterogeneity of `studies` around their Mantel-Haenszel pooled log odds
/// ratio.
///
/// Study-level log odds ratios and weights use the continuity-corrected
/// estimator, so double-zero studies take part here even though they are
/// left out of the pooled estimate. With fewer than two studies nothing is
/// computed and [`HeterogeneityStats::none`] is returned.
pub fn calculate_heterogeneity(studies: &[Study]) -> HeterogeneityStats {
    if studies.len() < 2 {
        return HeterogeneityStats::none();
    }

    let pooled = mantel_haenszel(studies);
    let center = if pooled.is_informative() {
        pooled.log_odds_ratio
    } else {
        0.0
    };

    let mut q = 0.0;
    let mut sum_w = 0.0;
    let mut sum_w2 = 0.0;
    for study in studies {
        let effect = study_effect(study);
        q += effect.weight * sq(effect.log_odds_ratio - center);
        sum_w += effect.weight;
        sum_w2 += sq(effect.weight);
    }

    let df = studies.len() - 1;
    let excess = q - df as f64;

    let c = sum_w - sum_w2 / sum_w;
    let tau_squared = if c > 0.0 { (excess / c).max(0.0) } else { 0.0 };

    let i_squared = if q > 0.0 {
        (excess / q * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    let p_value = 1.0 - chi_squared_cdf(q, df as f64);

    HeterogeneityStats {
        q,
        df,
        i_squared,
        tau_squared,
        p_value,
    }
}
