//! Input types: studies and design parameters.

extern crate alloc;

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_CONTROL_RATE, DEFAULT_HETEROGENEITY_CORRECTION,
    DEFAULT_RELATIVE_RISK_REDUCTION,
};

// ============================================================================
// Study
// ============================================================================

/// One randomized trial reporting a binary outcome in both arms.
///
/// Studies are created by the caller and never mutated by the engine. The
/// order of a study slice is significant: it is the order of the cumulative
/// looks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Study {
    /// Caller-assigned identifier.
    pub id: String,
    /// Display name, typically first author or trial acronym.
    pub name: String,
    /// Publication year.
    pub year: u16,
    /// Events in the treatment arm.
    #[serde(alias = "eventsTrt")]
    pub events_treatment: u64,
    /// Patients randomized to the treatment arm.
    #[serde(alias = "totalTrt")]
    pub total_treatment: u64,
    /// Events in the control arm.
    #[serde(alias = "eventsCtrl")]
    pub events_control: u64,
    /// Patients randomized to the control arm.
    #[serde(alias = "totalCtrl")]
    pub total_control: u64,
}

impl Study {
    /// Create a study from its 2×2 counts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        year: u16,
        events_treatment: u64,
        total_treatment: u64,
        events_control: u64,
        total_control: u64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year,
            events_treatment,
            total_treatment,
            events_control,
            total_control,
        }
    }

    /// Patients in both arms.
    pub fn total_patients(&self) -> u64 {
        self.total_treatment.saturating_add(self.total_control)
    }

    /// True when neither arm reports an event.
    ///
    /// Such studies carry no information about the odds ratio and are left
    /// out of the Mantel-Haenszel sums.
    pub fn is_double_zero(&self) -> bool {
        self.events_treatment == 0 && self.events_control == 0
    }

    /// Check the count invariants: totals are positive and events never
    /// exceed their arm's total.
    pub fn validate(&self) -> Result<(), StudyError> {
        if self.total_treatment == 0 {
            return Err(StudyError::EmptyArm {
                study: self.id.clone(),
                arm: Arm::Treatment,
            });
        }
        if self.total_control == 0 {
            return Err(StudyError::EmptyArm {
                study: self.id.clone(),
                arm: Arm::Control,
            });
        }
        if self.events_treatment > self.total_treatment {
            return Err(StudyError::EventsExceedTotal {
                study: self.id.clone(),
                arm: Arm::Treatment,
                events: self.events_treatment,
                total: self.total_treatment,
            });
        }
        if self.events_control > self.total_control {
            return Err(StudyError::EventsExceedTotal {
                study: self.id.clone(),
                arm: Arm::Control,
                events: self.events_control,
                total: self.total_control,
            });
        }
        Ok(())
    }
}

/// Trial arm, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arm {
    /// Experimental intervention.
    Treatment,
    /// Comparator.
    Control,
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arm::Treatment => write!(f, "treatment"),
            Arm::Control => write!(f, "control"),
        }
    }
}

/// A study whose counts violate the 2×2 invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyError {
    /// An arm has no patients.
    EmptyArm {
        /// Identifier of the offending study.
        study: String,
        /// Arm with a zero total.
        arm: Arm,
    },
    /// More events than patients in an arm.
    EventsExceedTotal {
        /// Identifier of the offending study.
        study: String,
        /// Arm with too many events.
        arm: Arm,
        /// Reported events.
        events: u64,
        /// Reported total.
        total: u64,
    },
}

impl fmt::Display for StudyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudyError::EmptyArm { study, arm } => {
                write!(f, "study '{}': {} arm has no patients", study, arm)
            }
            StudyError::EventsExceedTotal {
                study,
                arm,
                events,
                total,
            } => write!(
                f,
                "study '{}': {} arm reports {} events out of {} patients",
                study, arm, events, total
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StudyError {}

// ============================================================================
// Futility policy
// ============================================================================

/// Futility boundary policy.
///
/// Only [`None`](FutilityBoundaryType::None) and
/// [`ObrienFleming`](FutilityBoundaryType::ObrienFleming) have defined
/// boundaries. The remaining tags are accepted as input so that design files
/// round-trip, but computing a boundary with them fails with
/// [`BoundaryError::UnsupportedPolicy`](crate::spending::BoundaryError).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FutilityBoundaryType {
    /// No futility monitoring.
    None,
    /// O'Brien-Fleming-type inner wedge.
    #[default]
    ObrienFleming,
    /// Pocock-type futility boundary (not implemented).
    Pocock,
    /// Stochastic curtailment by conditional power (not implemented).
    ConditionalPower,
}

impl FutilityBoundaryType {
    /// Canonical kebab-case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FutilityBoundaryType::None => "none",
            FutilityBoundaryType::ObrienFleming => "obrien-fleming",
            FutilityBoundaryType::Pocock => "pocock",
            FutilityBoundaryType::ConditionalPower => "conditional-power",
        }
    }

    /// Whether a boundary can be computed for this policy.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            FutilityBoundaryType::None | FutilityBoundaryType::ObrienFleming
        )
    }
}

impl fmt::Display for FutilityBoundaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FutilityBoundaryType {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(FutilityBoundaryType::None),
            "obrien-fleming" | "obrien_fleming" | "of" => Ok(FutilityBoundaryType::ObrienFleming),
            "pocock" => Ok(FutilityBoundaryType::Pocock),
            "conditional-power" | "conditional_power" => {
                Ok(FutilityBoundaryType::ConditionalPower)
            }
            _ => Err(ParameterError::UnknownFutilityPolicy(s.to_string())),
        }
    }
}

// ============================================================================
// Design parameters
// ============================================================================

/// Design parameters of one analysis run.
///
/// The engine never rejects parameters: values outside the documented ranges
/// produce sentinel sizes and boundaries. Callers that want to reject bad
/// input up front use [`DesignParameters::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Two-sided Type-I error, in (0, 0.5).
    pub alpha: f64,
    /// Type-II error, in (0, 0.5).
    pub beta: f64,
    /// Anticipated control-arm event rate p₀, in (0, 1).
    pub control_rate: f64,
    /// Anticipated relative risk reduction in percent, in (0, 100).
    pub relative_risk_reduction: f64,
    /// Multiplicative RIS inflation for between-study heterogeneity, ≥ 1.
    pub heterogeneity_correction: f64,
    /// Futility boundary policy.
    #[serde(default)]
    pub futility: FutilityBoundaryType,
    /// Additionally inflate the RIS by 1 / (1 − I²) using the observed I².
    #[serde(default)]
    pub use_i2_adjustment: bool,
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            control_rate: DEFAULT_CONTROL_RATE,
            relative_risk_reduction: DEFAULT_RELATIVE_RISK_REDUCTION,
            heterogeneity_correction: DEFAULT_HETEROGENEITY_CORRECTION,
            futility: FutilityBoundaryType::default(),
            use_i2_adjustment: false,
        }
    }
}

impl DesignParameters {
    /// Anticipated treatment-arm event rate p₁ = p₀ · (1 − RRR/100).
    pub fn treatment_rate(&self) -> f64 {
        self.control_rate * (1.0 - self.relative_risk_reduction / 100.0)
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), ParameterError> {
        check_open_range("alpha", self.alpha, 0.0, 0.5, "(0, 0.5)")?;
        check_open_range("beta", self.beta, 0.0, 0.5, "(0, 0.5)")?;
        check_open_range("control_rate", self.control_rate, 0.0, 1.0, "(0, 1)")?;
        check_open_range(
            "relative_risk_reduction",
            self.relative_risk_reduction,
            0.0,
            100.0,
            "(0, 100)",
        )?;
        if !(self.heterogeneity_correction >= 1.0 && self.heterogeneity_correction.is_finite()) {
            return Err(ParameterError::OutOfRange {
                name: "heterogeneity_correction",
                value: self.heterogeneity_correction,
                expected: "[1, inf)",
            });
        }
        Ok(())
    }
}

fn check_open_range(
    name: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    expected: &'static str,
) -> Result<(), ParameterError> {
    if value > lo && value < hi {
        Ok(())
    } else {
        Err(ParameterError::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

/// A design parameter outside its documented range.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Numeric field outside its admissible interval.
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Admissible interval, for display.
        expected: &'static str,
    },
    /// Futility policy name not recognized.
    UnknownFutilityPolicy(String),
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterError::OutOfRange {
                name,
                value,
                expected,
            } => write!(f, "{} must be in {}, got {}", name, expected, value),
            ParameterError::UnknownFutilityPolicy(name) => write!(
                f,
                "unknown futility policy '{}' (expected none, obrien-fleming, pocock or conditional-power)",
                name
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParameterError {}
