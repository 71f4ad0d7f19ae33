//! Tests for configuration validation.
//!
//! These tests verify that invalid configuration values are rejected
//! by the builder methods with appropriate panic messages.

use tsa::{Config, FutilityBoundaryType, TrialSequentialAnalysis};

// =============================================================================
// ERROR RATES
// =============================================================================

#[test]
#[should_panic(expected = "alpha must be in (0, 0.5)")]
fn alpha_zero_panics() {
    let _ = TrialSequentialAnalysis::new().alpha(0.0);
}

#[test]
#[should_panic(expected = "alpha must be in (0, 0.5)")]
fn alpha_half_panics() {
    let _ = Config::new().alpha(0.5);
}

#[test]
fn alpha_small_valid() {
    let analysis = TrialSequentialAnalysis::new().alpha(0.001);
    assert_eq!(analysis.config().alpha, 0.001);
}

#[test]
#[should_panic(expected = "beta must be in (0, 0.5)")]
fn beta_negative_panics() {
    let _ = TrialSequentialAnalysis::new().beta(-0.1);
}

#[test]
#[should_panic(expected = "power must be in (0.5, 1)")]
fn power_one_panics() {
    let _ = Config::new().power(1.0);
}

// =============================================================================
// ANTICIPATED EFFECT
// =============================================================================

#[test]
#[should_panic(expected = "control_rate must be in (0, 1)")]
fn control_rate_one_panics() {
    let _ = TrialSequentialAnalysis::new().control_rate(1.0);
}

#[test]
#[should_panic(expected = "relative_risk_reduction must be in (0, 100)")]
fn rrr_zero_panics() {
    let _ = TrialSequentialAnalysis::new().relative_risk_reduction(0.0);
}

#[test]
#[should_panic(expected = "relative_risk_reduction must be in (0, 100)")]
fn rrr_hundred_panics() {
    let _ = Config::new().relative_risk_reduction(100.0);
}

#[test]
#[should_panic(expected = "heterogeneity_correction must be >= 1")]
fn heterogeneity_correction_below_one_panics() {
    let _ = TrialSequentialAnalysis::new().heterogeneity_correction(0.99);
}

#[test]
#[should_panic(expected = "heterogeneity_correction must be >= 1")]
fn heterogeneity_correction_infinite_panics() {
    let _ = Config::new().heterogeneity_correction(f64::INFINITY);
}

#[test]
fn heterogeneity_correction_one_valid() {
    let analysis = TrialSequentialAnalysis::new().heterogeneity_correction(1.0);
    assert_eq!(analysis.config().heterogeneity_correction, 1.0);
}

// =============================================================================
// PRESETS AND VALIDATION
// =============================================================================

#[test]
fn presets_are_valid() {
    for config in [Config::new(), Config::conservative(), Config::exploratory()] {
        assert!(config.validate().is_ok(), "{:?}", config);
    }
}

#[test]
fn exploratory_disables_futility() {
    let analysis = TrialSequentialAnalysis::exploratory();
    assert_eq!(analysis.config().futility, FutilityBoundaryType::None);
}

#[test]
fn direct_field_errors_are_reported() {
    let config = Config {
        control_rate: 1.5,
        ..Config::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "control_rate must be in (0, 1), got 1.5");
}

#[test]
fn futility_policy_parses_from_cli_names() {
    assert_eq!(
        "none".parse::<FutilityBoundaryType>().unwrap(),
        FutilityBoundaryType::None
    );
    assert_eq!(
        "obrien-fleming".parse::<FutilityBoundaryType>().unwrap(),
        FutilityBoundaryType::ObrienFleming
    );
    assert!("linear".parse::<FutilityBoundaryType>().is_err());
}
