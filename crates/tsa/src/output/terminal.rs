//! Terminal output formatting with colors.
//!
//! The main layout lives in `tsa_core::formatting`; with the `std` feature
//! (always on here) it includes ANSI color codes, honoring `NO_COLOR`.

use colored::Colorize;

use tsa_core::constants::RIS_SENTINEL;
use tsa_core::{HeterogeneityStats, TsaResult};

/// Format a TsaResult for human-readable terminal output.
///
/// With `TSA_VERBOSE` set, a spending and notes section is appended.
pub fn format_result(result: &TsaResult) -> String {
    let mut out = tsa_core::formatting::format_result_plain(result);
    let notes = format_notes(result);
    if is_verbose() {
        out.push_str(&format_spending_section(result));
    }
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    out
}

/// Format a compact summary, suitable for assertion messages.
pub fn format_debug_summary(result: &TsaResult) -> String {
    tsa_core::formatting::format_debug_summary_plain(result)
}

/// Format the cumulative trace as a table.
pub fn format_trace_table(result: &TsaResult) -> String {
    tsa_core::formatting::format_trace_table(result)
}

/// Format heterogeneity statistics.
pub fn format_heterogeneity(stats: &HeterogeneityStats) -> String {
    tsa_core::formatting::format_heterogeneity(stats)
}

/// Per-look error spending, for verbose output.
fn format_spending_section(result: &TsaResult) -> String {
    let mut out = String::new();
    let sep = "\u{2500}".repeat(62);

    out.push('\n');
    out.push_str(&sep);
    out.push_str("\n\n");
    out.push_str("  Error Spending\n\n");
    out.push_str(&format!(
        "    {:>3}  {:>7}  {:>10}  {:>10}\n",
        "#", "t", "α spent", "β spent"
    ));
    for record in &result.records {
        out.push_str(&format!(
            "    {:>3}  {:>7.3}  {:>10.6}  {:>10.6}\n",
            record.index + 1,
            record.information_fraction,
            record.alpha_spent,
            record.beta_spent
        ));
    }
    out.push_str(&format!(
        "\n    Budget: α = {}, β = {}\n",
        result.parameters.alpha, result.parameters.beta
    ));

    out
}

/// Caveats about degenerate inputs, one per line.
fn format_notes(result: &TsaResult) -> String {
    let mut out = String::new();

    if result.required_information_size == RIS_SENTINEL {
        out.push_str(&format!(
            "  {} {}\n",
            "\u{26A0}".yellow(),
            "The design could not be sized; the information size is a placeholder."
                .yellow()
        ));
    }
    let excluded = result.records.len() - result.pooled.studies_pooled.min(result.records.len());
    if excluded > 0 {
        out.push_str(&format!(
            "  {} {}\n",
            "\u{2022}".dimmed(),
            format!(
                "{} double-zero stud{} left out of the pooled estimate.",
                excluded,
                if excluded == 1 { "y" } else { "ies" }
            )
            .dimmed()
        ));
    }

    out
}

/// Check if an environment variable is set to a truthy value.
///
/// Returns true if the variable is set to "1", "true", or "yes" (case-insensitive).
/// Returns false if unset, empty, "0", "false", or "no".
fn env_is_truthy(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Check if verbose output is enabled via `TSA_VERBOSE`.
pub fn is_verbose() -> bool {
    env_is_truthy("TSA_VERBOSE")
}
