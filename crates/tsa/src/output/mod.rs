//! Output formatting for analysis results.
//!
//! This module provides formatters for displaying `TsaResult` in different formats:
//! - Terminal: Human-readable output with colors
//! - JSON: Machine-readable serialization of the whole result
//! - CSV: The cumulative trace, one row per study, for charting

mod csv;
mod json;
mod terminal;

pub use self::csv::{trace_to_csv, TRACE_HEADER};
pub use json::{to_json, to_json_pretty};
pub use terminal::{
    format_debug_summary, format_heterogeneity, format_result, format_trace_table, is_verbose,
};
