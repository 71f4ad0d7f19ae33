//! Core numerics for trial sequential analysis (TSA) of binary-outcome
//! meta-analyses.
//!
//! Studies are added one at a time to a running Mantel-Haenszel pool. After
//! each addition the cumulative Z statistic is compared against Lan-DeMets
//! O'Brien-Fleming-type monitoring and futility boundaries, evaluated at the
//! information fraction (cumulative patients over the required information
//! size). The result is a per-study trace plus an interpretation of the
//! final look.
//!
//! This crate works in `no_std` environments with only an allocator.
//!
//! # Features
//!
//! - `std` (default): `std::error::Error` impls and ANSI colors in
//!   `Display` output
//!
//! # Usage
//!
//! This crate is typically used through the `tsa` crate, which adds
//! configuration, data loading and output formats.
//!
//! ```
//! use tsa_core::{run_tsa, Conclusion, DesignParameters, Study};
//!
//! let studies = [
//!     Study::new("a", "Trial A", 2001, 40, 1000, 80, 1000),
//!     Study::new("b", "Trial B", 2004, 45, 1000, 85, 1000),
//! ];
//! let result = run_tsa(&studies, &DesignParameters::default())
//!     .unwrap()
//!     .expect("non-empty study list");
//! assert_eq!(result.records.len(), 2);
//! assert_eq!(result.conclusion(), Conclusion::ConclusiveBenefit);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod colors;
pub mod constants;
pub mod effect;
pub mod formatting;
pub mod heterogeneity;
pub mod math;
pub mod pooling;
pub mod result;
pub mod sample_size;
pub mod sequential;
pub mod spending;
pub mod types;

// Re-export commonly used items at crate root
pub use effect::{study_effect, StudyEffect};
pub use heterogeneity::{calculate_heterogeneity, HeterogeneityStats};
pub use pooling::{mantel_haenszel, MantelHaenszel, PooledEffect};
pub use result::{Conclusion, CumulativeRecord, Interpretation, TsaResult};
pub use sample_size::{i2_adjusted_information_size, required_information_size};
pub use sequential::{run_tsa, EffectDirection, MonitoringState};
pub use spending::{
    alpha_spending, beta_spending, futility_boundary, monitoring_boundary, BoundaryError,
};
pub use types::{DesignParameters, FutilityBoundaryType, ParameterError, Study, StudyError};
