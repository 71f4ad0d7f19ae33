//! # tsa
//!
//! Trial sequential analysis (TSA) for cumulative meta-analyses of binary
//! outcomes.
//!
//! A meta-analysis that is updated every time a new trial is published looks
//! at the accumulating data repeatedly, and each look spends some of the
//! Type-I error. TSA controls this by comparing the cumulative Z statistic
//! against Lan-DeMets O'Brien-Fleming-type boundaries evaluated at the
//! information fraction: cumulative patients over the required information
//! size (RIS).
//!
//! This crate wraps the numerics in `tsa-core` with:
//! - [`Config`] presets and a [`TrialSequentialAnalysis`] builder
//! - [`data`] loaders for CSV and JSON study lists
//! - [`output`] formatters for terminal, JSON and CSV
//! - the `tsa` command-line tool (feature `cli`)
//!
//! ## Sign convention
//!
//! Odds ratios are treatment over control. A **negative Z favors
//! treatment** (fewer events on the intervention arm).
//!
//! ## Quick Start
//!
//! ```
//! use tsa::{Conclusion, Study, TrialSequentialAnalysis};
//!
//! let studies = vec![
//!     Study::new("a", "Trial A", 2001, 40, 1000, 80, 1000),
//!     Study::new("b", "Trial B", 2004, 45, 1000, 85, 1000),
//! ];
//! let result = TrialSequentialAnalysis::new()
//!     .run_checked(&studies)
//!     .unwrap();
//!
//! match result.conclusion() {
//!     Conclusion::ConclusiveBenefit => println!("{}", result.interpretation.title),
//!     other => println!("{}", other),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod config;
mod error;
mod runner;

// Functional modules
pub mod data;
pub mod output;

// Re-exports for public API
pub use config::Config;
pub use error::TsaError;
pub use runner::{run_batch, TrialSequentialAnalysis};

pub use tsa_core::{
    Conclusion, CumulativeRecord, DesignParameters, EffectDirection, FutilityBoundaryType,
    HeterogeneityStats, Interpretation, MonitoringState, PooledEffect, Study, TsaResult,
};
