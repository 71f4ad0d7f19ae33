//! Configuration for a trial sequential analysis run.

use tsa_core::constants::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_CONTROL_RATE, DEFAULT_HETEROGENEITY_CORRECTION,
    DEFAULT_RELATIVE_RISK_REDUCTION,
};
use tsa_core::{DesignParameters, FutilityBoundaryType, ParameterError};

/// Configuration options for [`TrialSequentialAnalysis`](crate::TrialSequentialAnalysis).
///
/// Builder methods panic on out-of-range values with a stable message. Fields
/// set directly can be checked with [`Config::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // =========================================================================
    // Error rates
    // =========================================================================
    /// Two-sided Type-I error.
    ///
    /// Spent over the sequential looks by the O'Brien-Fleming-type
    /// alpha-spending function. Default: 0.05.
    pub alpha: f64,

    /// Type-II error (1 − power). Default: 0.20.
    pub beta: f64,

    // =========================================================================
    // Anticipated effect
    // =========================================================================
    /// Anticipated event rate in the control arm. Default: 0.10.
    pub control_rate: f64,

    /// Anticipated relative risk reduction, in percent. Default: 20.
    pub relative_risk_reduction: f64,

    /// Multiplicative inflation of the required information size for
    /// between-study heterogeneity (diversity adjustment). Default: 1.0.
    pub heterogeneity_correction: f64,

    // =========================================================================
    // Monitoring
    // =========================================================================
    /// Futility boundary policy. Default: O'Brien-Fleming.
    pub futility: FutilityBoundaryType,

    /// Inflate the required information size by 1 / (1 − I²) using the
    /// observed I². Default: false.
    pub use_i2_adjustment: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            control_rate: DEFAULT_CONTROL_RATE,
            relative_risk_reduction: DEFAULT_RELATIVE_RISK_REDUCTION,
            heterogeneity_correction: DEFAULT_HETEROGENEITY_CORRECTION,
            futility: FutilityBoundaryType::ObrienFleming,
            use_i2_adjustment: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stricter error rates for confirmatory reviews.
    ///
    /// - α = 0.01
    /// - β = 0.10 (90% power)
    pub fn conservative() -> Self {
        Self {
            alpha: 0.01,
            beta: 0.10,
            ..Default::default()
        }
    }

    /// Default error rates without futility monitoring.
    ///
    /// Useful when scanning many outcomes, where only the efficacy/harm
    /// boundary is of interest.
    pub fn exploratory() -> Self {
        Self {
            futility: FutilityBoundaryType::None,
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the two-sided Type-I error.
    pub fn alpha(mut self, alpha: f64) -> Self {
        assert!(alpha > 0.0 && alpha < 0.5, "alpha must be in (0, 0.5)");
        self.alpha = alpha;
        self
    }

    /// Set the Type-II error.
    pub fn beta(mut self, beta: f64) -> Self {
        assert!(beta > 0.0 && beta < 0.5, "beta must be in (0, 0.5)");
        self.beta = beta;
        self
    }

    /// Set the power (1 − β).
    pub fn power(self, power: f64) -> Self {
        assert!(power > 0.5 && power < 1.0, "power must be in (0.5, 1)");
        self.beta(1.0 - power)
    }

    /// Set the anticipated control-arm event rate.
    pub fn control_rate(mut self, rate: f64) -> Self {
        assert!(rate > 0.0 && rate < 1.0, "control_rate must be in (0, 1)");
        self.control_rate = rate;
        self
    }

    /// Set the anticipated relative risk reduction, in percent.
    pub fn relative_risk_reduction(mut self, percent: f64) -> Self {
        assert!(
            percent > 0.0 && percent < 100.0,
            "relative_risk_reduction must be in (0, 100)"
        );
        self.relative_risk_reduction = percent;
        self
    }

    /// Set the heterogeneity correction factor.
    pub fn heterogeneity_correction(mut self, factor: f64) -> Self {
        assert!(
            factor >= 1.0 && factor.is_finite(),
            "heterogeneity_correction must be >= 1"
        );
        self.heterogeneity_correction = factor;
        self
    }

    /// Set the futility boundary policy.
    pub fn futility(mut self, policy: FutilityBoundaryType) -> Self {
        self.futility = policy;
        self
    }

    /// Enable or disable the I² adjustment of the information size.
    pub fn i2_adjustment(mut self, enabled: bool) -> Self {
        self.use_i2_adjustment = enabled;
        self
    }

    // =========================================================================
    // Resolution methods
    // =========================================================================

    /// The design parameters handed to the engine.
    pub fn to_design_parameters(&self) -> DesignParameters {
        DesignParameters {
            alpha: self.alpha,
            beta: self.beta,
            control_rate: self.control_rate,
            relative_risk_reduction: self.relative_risk_reduction,
            heterogeneity_correction: self.heterogeneity_correction,
            futility: self.futility,
            use_i2_adjustment: self.use_i2_adjustment,
        }
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.to_design_parameters().validate()
    }
}

impl From<&Config> for DesignParameters {
    fn from(config: &Config) -> Self {
        config.to_design_parameters()
    }
}
