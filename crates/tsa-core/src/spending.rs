//! Lan-DeMets O'Brien-Fleming-type spending functions and the boundaries they
//! imply.
//!
//! All functions take the information fraction `t` (cumulative patients over
//! the required information size) as the sequential clock. Boundaries are on
//! the Z scale and are compared against |Z|.
//!
//! The monitoring boundary is the exact inversion of the alpha-spending
//! function:
//! ```text
//! α*(t) = 2·[1 − Φ(z_{α/2} / √t)]   ⇔   b(t) = z_{α/2} / √t
//! ```

use core::fmt;

use crate::constants::{BOUNDARY_CLAMP_FRACTION, BOUNDARY_SENTINEL, FUTILITY_WEDGE_SCALE};
use crate::math::{self, normal_cdf, normal_quantile};
use crate::types::FutilityBoundaryType;

/// Cumulative Type-I error spent at information fraction `t`.
///
/// Returns 0 for `t <= 0` and exactly `alpha` for `t >= 1`.
pub fn alpha_spending(t: f64, alpha: f64) -> f64 {
    obrien_fleming_spending(t, alpha)
}

/// Cumulative Type-II error spent at information fraction `t`.
///
/// Same functional form as [`alpha_spending`] with β in place of α.
pub fn beta_spending(t: f64, beta: f64) -> f64 {
    obrien_fleming_spending(t, beta)
}

fn obrien_fleming_spending(t: f64, error: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return error;
    }
    let z = normal_quantile(1.0 - error / 2.0);
    // The erf approximation overshoots slightly just below t = 1
    (2.0 * (1.0 - normal_cdf(z / math::sqrt(t)))).min(error)
}

/// Two-sided monitoring (efficacy/harm) boundary at information fraction `t`.
///
/// - `t <= 0`: [`BOUNDARY_SENTINEL`], which no observed Z reaches.
/// - `t >= 1.5`: clamped to the conventional critical value z_{α/2}.
/// - otherwise: z_{α/2} / √t.
pub fn monitoring_boundary(t: f64, alpha: f64) -> f64 {
    if t <= 0.0 {
        return BOUNDARY_SENTINEL;
    }
    let z = normal_quantile(1.0 - alpha / 2.0);
    if t >= BOUNDARY_CLAMP_FRACTION {
        return z;
    }
    z / math::sqrt(t)
}

/// Futility (inner wedge) boundary at information fraction `t`.
///
/// For [`FutilityBoundaryType::ObrienFleming`]:
/// - `t <= 0`: 0 (no futility region yet).
/// - `t >= 1`: Φ⁻¹(β).
/// - otherwise: min(0.5 · z_{1−β/2} / √t, z_{1−β}).
///
/// The 0.5 factor ([`FUTILITY_WEDGE_SCALE`]) is an approximation that keeps
/// the wedge strictly inside the monitoring boundary on (0, 1). It is not a
/// numerical inversion of [`beta_spending`].
///
/// [`FutilityBoundaryType::None`] always yields 0. Pocock and
/// conditional-power policies are rejected.
pub fn futility_boundary(
    t: f64,
    beta: f64,
    policy: FutilityBoundaryType,
) -> Result<f64, BoundaryError> {
    match policy {
        FutilityBoundaryType::None => Ok(0.0),
        FutilityBoundaryType::ObrienFleming => Ok(obrien_fleming_futility(t, beta)),
        FutilityBoundaryType::Pocock | FutilityBoundaryType::ConditionalPower => {
            Err(BoundaryError::UnsupportedPolicy(policy))
        }
    }
}

fn obrien_fleming_futility(t: f64, beta: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return normal_quantile(beta);
    }
    let wedge = normal_quantile(1.0 - beta / 2.0) / math::sqrt(t) * FUTILITY_WEDGE_SCALE;
    wedge.min(normal_quantile(1.0 - beta))
}

/// Error computing a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryError {
    /// The futility policy is a recognized tag without a defined boundary.
    UnsupportedPolicy(FutilityBoundaryType),
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryError::UnsupportedPolicy(policy) => write!(
                f,
                "futility policy '{}' has no boundary implementation (use none or obrien-fleming)",
                policy
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoundaryError {}
