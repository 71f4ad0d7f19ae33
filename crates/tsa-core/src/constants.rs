//! Numerical constants and defaults used throughout the crate.

// =============================================================================
// Special functions
// =============================================================================

/// Relative tolerance for the incomplete gamma series and continued fraction.
pub const GAMMA_EPSILON: f64 = 1e-10;

/// Iteration cap for the incomplete gamma series and continued fraction.
pub const GAMMA_MAX_ITERATIONS: usize = 100;

// =============================================================================
// Sentinels
// =============================================================================

/// Monitoring boundary reported before any information has accrued (t ≤ 0).
///
/// No realistic Z-statistic reaches this value, so the boundary can never be
/// crossed at t = 0.
pub const BOUNDARY_SENTINEL: f64 = 10.0;

/// Information fraction beyond which the monitoring boundary is clamped to the
/// conventional two-sided critical value.
pub const BOUNDARY_CLAMP_FRACTION: f64 = 1.5;

/// Required information size reported when the design cannot be sized
/// (rates outside (0, 1) or an anticipated effect too close to null).
pub const RIS_SENTINEL: u64 = 100_000;

/// Smallest |ln(OR)| the sample-size formula will divide by.
pub const MIN_LOG_ODDS_RATIO: f64 = 0.001;

/// Added to every cell of a 2×2 table that contains a zero.
pub const CONTINUITY_CORRECTION: f64 = 0.5;

/// Scaling applied to the O'Brien-Fleming-type futility wedge.
///
/// An inner-wedge approximation, not an inversion of the beta-spending
/// function.
pub const FUTILITY_WEDGE_SCALE: f64 = 0.5;

// =============================================================================
// Default design parameters
// =============================================================================

/// Default two-sided Type-I error.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default Type-II error (80% power).
pub const DEFAULT_BETA: f64 = 0.20;

/// Default anticipated control-arm event rate.
pub const DEFAULT_CONTROL_RATE: f64 = 0.10;

/// Default anticipated relative risk reduction, in percent.
pub const DEFAULT_RELATIVE_RISK_REDUCTION: f64 = 20.0;

/// Default heterogeneity correction (no inflation).
pub const DEFAULT_HETEROGENEITY_CORRECTION: f64 = 1.0;

/// Confidence level of the pooled odds-ratio interval.
pub const CONFIDENCE_LEVEL: f64 = 0.95;
