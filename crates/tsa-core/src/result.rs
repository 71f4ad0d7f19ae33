//! Result types of a trial sequential analysis.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::heterogeneity::HeterogeneityStats;
use crate::pooling::PooledEffect;
use crate::sequential::MonitoringState;
use crate::types::DesignParameters;

// ============================================================================
// CumulativeRecord - one look of the trace
// ============================================================================

/// The cumulative state after adding one study.
///
/// Records are produced append-only by [`run_tsa`](crate::sequential::run_tsa),
/// one per input study in input order. Each record carries its own boundary
/// and spending values so the whole trajectory can be charted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeRecord {
    /// Zero-based position of the study in the input list.
    pub index: usize,

    /// Identifier of the study added at this look.
    pub study_id: String,

    /// Display name of the study added at this look.
    pub study_name: String,

    /// Publication year of the study added at this look.
    pub year: u16,

    /// Patients in all studies up to and including this one.
    pub cumulative_patients: u64,

    /// Cumulative patients over the information size in use.
    ///
    /// May exceed 1 once the required information size is reached.
    pub information_fraction: f64,

    /// Cumulative Wald Z of the pooled log odds ratio (0 when uninformative).
    /// Negative values favor treatment.
    pub z_statistic: f64,

    /// Two-sided monitoring boundary at this information fraction.
    pub monitoring_boundary: f64,

    /// Futility boundary at this information fraction (0 without futility
    /// monitoring).
    pub futility_boundary: f64,

    /// Mantel-Haenszel pooled odds ratio.
    pub odds_ratio: f64,

    /// Lower bound of the pooled 95% confidence interval.
    pub ci_lower: f64,

    /// Upper bound of the pooled 95% confidence interval.
    pub ci_upper: f64,

    /// Cumulative Type-I error spent.
    pub alpha_spent: f64,

    /// Cumulative Type-II error spent.
    pub beta_spent: f64,

    /// Where this look sits relative to its boundaries.
    pub state: MonitoringState,
}

// ============================================================================
// Interpretation
// ============================================================================

/// Verdict drawn from the final look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Conclusion {
    /// The final Z crossed the monitoring boundary in favor of treatment.
    ConclusiveBenefit,
    /// The final Z crossed the monitoring boundary in favor of control.
    ConclusiveHarm,
    /// The final Z lies inside the futility wedge.
    Futility,
    /// None of the above; more information is needed.
    Inconclusive,
}

impl Conclusion {
    /// Map a monitoring state to the conclusion it implies.
    pub fn from_state(state: MonitoringState) -> Self {
        match state {
            MonitoringState::BoundaryCrossedBenefit => Conclusion::ConclusiveBenefit,
            MonitoringState::BoundaryCrossedHarm => Conclusion::ConclusiveHarm,
            MonitoringState::FutilityDeclared => Conclusion::Futility,
            MonitoringState::Continuing => Conclusion::Inconclusive,
        }
    }

    /// Canonical kebab-case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Conclusion::ConclusiveBenefit => "conclusive-benefit",
            Conclusion::ConclusiveHarm => "conclusive-harm",
            Conclusion::Futility => "futility",
            Conclusion::Inconclusive => "inconclusive",
        }
    }

    /// Whether the evidence is firm enough to stop.
    pub fn is_conclusive(&self) -> bool {
        !matches!(self, Conclusion::Inconclusive)
    }
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal interpretation of a trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    /// Machine-readable verdict.
    pub conclusion: Conclusion,
    /// One-line headline.
    pub title: String,
    /// Explanation referring to the final look.
    pub message: String,
}

impl Interpretation {
    /// Interpret the final record of a trace.
    ///
    /// Only the final record is consulted; crossings at earlier looks do not
    /// affect the verdict.
    pub fn from_record(record: &CumulativeRecord) -> Self {
        let conclusion = Conclusion::from_state(record.state);
        let z = record.z_statistic;
        let percent = record.information_fraction * 100.0;

        let (title, message) = match conclusion {
            Conclusion::ConclusiveBenefit => (
                String::from("Firm evidence of benefit"),
                format!(
                    "The cumulative Z-curve (Z = {:.2}) crossed the monitoring boundary \
                     (\u{00B1}{:.2}) in favor of treatment at {:.1}% of the required \
                     information size. Further trials are unlikely to change this conclusion.",
                    z, record.monitoring_boundary, percent
                ),
            ),
            Conclusion::ConclusiveHarm => (
                String::from("Firm evidence of harm"),
                format!(
                    "The cumulative Z-curve (Z = {:.2}) crossed the monitoring boundary \
                     (\u{00B1}{:.2}) in favor of control at {:.1}% of the required \
                     information size. The intervention increases the event rate.",
                    z, record.monitoring_boundary, percent
                ),
            ),
            Conclusion::Futility => (
                String::from("Futility boundary reached"),
                format!(
                    "The cumulative Z-curve (Z = {:.2}) lies inside the futility boundary \
                     (\u{00B1}{:.2}) at {:.1}% of the required information size. The \
                     anticipated effect is unlikely to be demonstrated.",
                    z, record.futility_boundary, percent
                ),
            ),
            Conclusion::Inconclusive => (
                String::from("Evidence is inconclusive"),
                format!(
                    "The cumulative Z-curve (Z = {:.2}) has crossed neither the monitoring \
                     boundary (\u{00B1}{:.2}) nor the futility boundary at {:.1}% of the \
                     required information size. More trials are needed.",
                    z, record.monitoring_boundary, percent
                ),
            ),
        };

        Self {
            conclusion,
            title,
            message,
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

// ============================================================================
// TsaResult
// ============================================================================

/// Complete output of one analysis run.
///
/// A plain value: re-running with the same studies and parameters produces
/// an identical result.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct TsaResult {
    /// One record per input study, in input order.
    pub records: Vec<CumulativeRecord>,

    /// Verdict drawn from the final record.
    pub interpretation: Interpretation,

    /// Heterogeneity over the full study list.
    pub heterogeneity: HeterogeneityStats,

    /// Pooled estimate over the full study list.
    pub pooled: PooledEffect,

    /// Required information size from the design parameters.
    pub required_information_size: u64,

    /// Information size the fractions were computed against: the required
    /// size, inflated by 1 / (1 − I²) when the I² adjustment is enabled.
    pub information_size_used: u64,

    /// Index of the first record that crossed the monitoring boundary.
    pub first_crossing: Option<usize>,

    /// Design parameters of the run.
    pub parameters: DesignParameters,
}

impl TsaResult {
    /// The last record of the trace.
    ///
    /// Always `Some` for results produced by
    /// [`run_tsa`](crate::sequential::run_tsa).
    pub fn final_record(&self) -> Option<&CumulativeRecord> {
        self.records.last()
    }

    /// Verdict of the run.
    pub fn conclusion(&self) -> Conclusion {
        self.interpretation.conclusion
    }

    /// Total patients across all studies.
    pub fn total_patients(&self) -> u64 {
        self.final_record()
            .map(|r| r.cumulative_patients)
            .unwrap_or(0)
    }

    /// Whether the information size in use has been reached.
    pub fn information_size_reached(&self) -> bool {
        self.total_patients() >= self.information_size_used
    }

    /// Records that crossed the monitoring boundary, in trace order.
    pub fn crossings(&self) -> impl Iterator<Item = &CumulativeRecord> {
        self.records.iter().filter(|r| r.state.is_crossing())
    }
}

impl fmt::Display for TsaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::formatting::format_result_plain(self))
    }
}

impl fmt::Debug for TsaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::formatting::format_debug_summary_plain(self))
    }
}
