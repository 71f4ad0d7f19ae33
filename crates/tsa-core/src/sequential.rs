//! The sequential driver: one cumulative look per study, in caller order.
//!
//! # Sign convention
//!
//! The odds ratio is treatment over control, so `ln(OR) < 0` means fewer
//! events on treatment. With events counting a harmful outcome (death,
//! relapse), a **negative Z favors treatment** and a positive Z favors
//! control. [`EffectDirection::from_z`] is the single place this mapping
//! lives; the interpretation and the monitoring states both go through it.

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::heterogeneity::calculate_heterogeneity;
use crate::math;
use crate::pooling::MantelHaenszel;
use crate::result::{CumulativeRecord, Interpretation, TsaResult};
use crate::sample_size::{i2_adjusted_information_size, required_information_size};
use crate::spending::{
    alpha_spending, beta_spending, futility_boundary, monitoring_boundary, BoundaryError,
};
use crate::types::{DesignParameters, Study};

/// Direction of a cumulative Z statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectDirection {
    /// Z < 0: fewer events on treatment.
    FavorsTreatment,
    /// Z > 0: more events on treatment.
    FavorsControl,
    /// Z = 0 (including uninformative looks).
    Neutral,
}

impl EffectDirection {
    /// Map a Z statistic to its direction. Negative Z favors treatment.
    pub fn from_z(z: f64) -> Self {
        if z < 0.0 {
            EffectDirection::FavorsTreatment
        } else if z > 0.0 {
            EffectDirection::FavorsControl
        } else {
            EffectDirection::Neutral
        }
    }
}

impl fmt::Display for EffectDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectDirection::FavorsTreatment => write!(f, "favors treatment"),
            EffectDirection::FavorsControl => write!(f, "favors control"),
            EffectDirection::Neutral => write!(f, "neutral"),
        }
    }
}

/// Position of one cumulative look relative to its boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitoringState {
    /// Inside the monitoring boundary and outside the futility wedge.
    Continuing,
    /// |Z| beyond the monitoring boundary with Z < 0.
    BoundaryCrossedBenefit,
    /// |Z| beyond the monitoring boundary with Z > 0.
    BoundaryCrossedHarm,
    /// |Z| inside a positive futility boundary.
    FutilityDeclared,
}

impl MonitoringState {
    /// Classify a look.
    ///
    /// Crossing the monitoring boundary takes precedence over futility. Both
    /// comparisons are strict: |Z| equal to a boundary does not cross it. A
    /// futility boundary of 0 or below never declares futility.
    pub fn classify(z: f64, monitoring: f64, futility: f64) -> Self {
        let magnitude = math::abs(z);
        if magnitude > monitoring {
            match EffectDirection::from_z(z) {
                EffectDirection::FavorsTreatment => MonitoringState::BoundaryCrossedBenefit,
                // |Z| > boundary ≥ 0 rules out Neutral
                EffectDirection::FavorsControl | EffectDirection::Neutral => {
                    MonitoringState::BoundaryCrossedHarm
                }
            }
        } else if futility > 0.0 && magnitude < futility {
            MonitoringState::FutilityDeclared
        } else {
            MonitoringState::Continuing
        }
    }

    /// Whether the look crossed the monitoring boundary in either direction.
    pub fn is_crossing(&self) -> bool {
        matches!(
            self,
            MonitoringState::BoundaryCrossedBenefit | MonitoringState::BoundaryCrossedHarm
        )
    }

    /// Short label for tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            MonitoringState::Continuing => "continuing",
            MonitoringState::BoundaryCrossedBenefit => "crossed-benefit",
            MonitoringState::BoundaryCrossedHarm => "crossed-harm",
            MonitoringState::FutilityDeclared => "futility",
        }
    }
}

impl fmt::Display for MonitoringState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run a trial sequential analysis over `studies` in the order given.
///
/// Every study produces one [`CumulativeRecord`]; a boundary crossing part
/// way through is recorded but never stops the trace. The interpretation is
/// taken from the final record alone.
///
/// Returns `Ok(None)` for an empty study list. Fails only when the futility
/// policy has no boundary implementation. Parameters are not validated here;
/// out-of-range designs resolve to the sentinel RIS.
pub fn run_tsa(
    studies: &[Study],
    params: &DesignParameters,
) -> Result<Option<TsaResult>, BoundaryError> {
    if studies.is_empty() {
        return Ok(None);
    }

    let required_information_size = required_information_size(params);
    let heterogeneity = calculate_heterogeneity(studies);
    let information_size_used = if params.use_i2_adjustment {
        i2_adjusted_information_size(required_information_size, heterogeneity.i_squared)
    } else {
        required_information_size
    };
    let ris = information_size_used as f64;

    let mut records = Vec::with_capacity(studies.len());
    let mut pool = MantelHaenszel::new();
    let mut cumulative_patients: u64 = 0;
    let mut first_crossing = None;

    for (index, study) in studies.iter().enumerate() {
        cumulative_patients = cumulative_patients.saturating_add(study.total_patients());
        pool.push(study);
        let pooled = pool.estimate();

        let z_statistic = pooled.z_statistic();
        let information_fraction = cumulative_patients as f64 / ris;
        let monitoring = monitoring_boundary(information_fraction, params.alpha);
        let futility = futility_boundary(information_fraction, params.beta, params.futility)?;
        let state = MonitoringState::classify(z_statistic, monitoring, futility);

        if first_crossing.is_none() && state.is_crossing() {
            first_crossing = Some(index);
        }

        records.push(CumulativeRecord {
            index,
            study_id: study.id.clone(),
            study_name: study.name.clone(),
            year: study.year,
            cumulative_patients,
            information_fraction,
            z_statistic,
            monitoring_boundary: monitoring,
            futility_boundary: futility,
            odds_ratio: pooled.odds_ratio,
            ci_lower: pooled.ci_lower,
            ci_upper: pooled.ci_upper,
            alpha_spent: alpha_spending(information_fraction, params.alpha),
            beta_spent: beta_spending(information_fraction, params.beta),
            state,
        });
    }

    let pooled = pool.estimate();
    let interpretation = match records.last() {
        Some(last) => Interpretation::from_record(last),
        None => return Ok(None),
    };

    Ok(Some(TsaResult {
        records,
        interpretation,
        heterogeneity,
        pooled,
        required_information_size,
        information_size_used,
        first_crossing,
        parameters: *params,
    }))
}
