//! Formatting helpers for TsaResult display.
//!
//! These functions produce output that can be used directly by Display/Debug
//! implementations. When the `std` feature is enabled, output includes ANSI
//! color codes (via the `colored` crate). Without `std`, output is plain text.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt::Write;

use crate::colors::{bold, bold_cyan, bold_green, bold_red, bold_yellow, dim, green, red, yellow};
use crate::heterogeneity::HeterogeneityStats;
use crate::result::{Conclusion, CumulativeRecord, TsaResult};
use crate::sequential::MonitoringState;

/// Separator line used in output.
pub const SEPARATOR: &str = "──────────────────────────────────────────────────────────────";

/// Default terminal width for text wrapping.
const DEFAULT_WRAP_WIDTH: usize = 72;

// ============================================================================
// Main formatting functions
// ============================================================================

/// Format a TsaResult for human-readable output.
///
/// Headline, design summary, pooled estimate, heterogeneity and the full
/// cumulative trace.
pub fn format_result_plain(result: &TsaResult) -> String {
    let mut out = String::new();

    writeln!(out, "trial sequential analysis").unwrap();
    writeln!(out, "{}", SEPARATOR).unwrap();
    writeln!(out).unwrap();

    format_verdict(&mut out, result);
    format_design(&mut out, result);
    format_pooled(&mut out, result);
    out.push_str(&format_heterogeneity(&result.heterogeneity));
    writeln!(out).unwrap();
    out.push_str(&format_trace_table(result));

    writeln!(out).unwrap();
    writeln!(out, "{}", SEPARATOR).unwrap();
    write!(
        out,
        "Note: Z < 0 favors treatment. Boundaries are Lan-DeMets O'Brien-Fleming type."
    )
    .unwrap();

    out
}

/// Format a compact one-block summary.
pub fn format_debug_summary_plain(result: &TsaResult) -> String {
    let mut out = String::new();

    writeln!(out, "TsaResult {{").unwrap();
    writeln!(out, "  conclusion: {}", result.conclusion()).unwrap();
    writeln!(out, "  studies: {}", result.records.len()).unwrap();
    writeln!(
        out,
        "  patients: {} / {} (RIS {})",
        result.total_patients(),
        result.information_size_used,
        result.required_information_size
    )
    .unwrap();
    if let Some(last) = result.final_record() {
        writeln!(
            out,
            "  final: Z={:.3} boundary={:.3} futility={:.3} t={:.3}",
            last.z_statistic,
            last.monitoring_boundary,
            last.futility_boundary,
            last.information_fraction
        )
        .unwrap();
    }
    writeln!(
        out,
        "  pooled OR: {} [{}, {}]",
        fmt_ratio(result.pooled.odds_ratio),
        fmt_ratio(result.pooled.ci_lower),
        fmt_ratio(result.pooled.ci_upper)
    )
    .unwrap();
    writeln!(
        out,
        "  I²: {:.1}%  first crossing: {}",
        result.heterogeneity.i_squared,
        match result.first_crossing {
            Some(i) => format!("#{}", i + 1),
            None => String::from("none"),
        }
    )
    .unwrap();
    write!(out, "}}").unwrap();

    out
}

/// Format the cumulative trace as a fixed-width table.
pub fn format_trace_table(result: &TsaResult) -> String {
    let mut out = String::new();

    writeln!(out, "  {}", bold("Cumulative trace:")).unwrap();
    writeln!(
        out,
        "    {:>3}  {:<20} {:>4} {:>8} {:>7} {:>7} {:>7} {:>7} {:>17} {:>7}  {}",
        "#", "Study", "Year", "Patients", "t", "Z", "Bound", "Futil", "OR (95% CI)", "α spent", "State"
    )
    .unwrap();

    for record in &result.records {
        format_trace_row(&mut out, record);
    }

    out
}

/// Format heterogeneity statistics as an indented block.
pub fn format_heterogeneity(stats: &HeterogeneityStats) -> String {
    let mut out = String::new();

    writeln!(out, "  {}", bold("Heterogeneity:")).unwrap();
    writeln!(
        out,
        "    Q = {:.2} (df = {}), p = {:.4}",
        stats.q, stats.df, stats.p_value
    )
    .unwrap();
    let i2 = format!("I² = {:.1}%", stats.i_squared);
    let i2 = if stats.i_squared >= 75.0 {
        red(&i2)
    } else if stats.i_squared >= 50.0 {
        yellow(&i2)
    } else {
        i2
    };
    writeln!(out, "    {}, τ² = {:.4}", i2, stats.tau_squared).unwrap();

    out
}

// ============================================================================
// Sections
// ============================================================================

fn format_verdict(out: &mut String, result: &TsaResult) {
    let interpretation = &result.interpretation;
    let headline = match interpretation.conclusion {
        Conclusion::ConclusiveBenefit => bold_green(&format!("\u{2713} {}", interpretation.title)),
        Conclusion::ConclusiveHarm => bold_red(&format!("\u{2717} {}", interpretation.title)),
        Conclusion::Futility => bold_yellow(&format!("\u{25CB} {}", interpretation.title)),
        Conclusion::Inconclusive => bold_cyan(&format!("? {}", interpretation.title)),
    };
    writeln!(out, "  {}", headline).unwrap();
    for line in wrap_text(&interpretation.message, DEFAULT_WRAP_WIDTH - 4).lines() {
        writeln!(out, "    {}", line).unwrap();
    }
    if let Some(index) = result.first_crossing {
        if let Some(record) = result.records.get(index) {
            if result.final_record().map(|r| r.index) != Some(index) {
                writeln!(
                    out,
                    "    {}",
                    dim(&format!(
                        "First boundary crossing at look #{} ({}, {}).",
                        index + 1,
                        record.study_name,
                        record.year
                    ))
                )
                .unwrap();
            }
        }
    }
    writeln!(out).unwrap();
}

fn format_design(out: &mut String, result: &TsaResult) {
    let p = &result.parameters;
    writeln!(out, "  {}", bold("Design:")).unwrap();
    writeln!(
        out,
        "    α = {}, β = {} (power {:.0}%), futility: {}",
        p.alpha,
        p.beta,
        (1.0 - p.beta) * 100.0,
        p.futility
    )
    .unwrap();
    writeln!(
        out,
        "    Control rate {:.1}%, RRR {:.1}%, heterogeneity correction {:.2}",
        p.control_rate * 100.0,
        p.relative_risk_reduction,
        p.heterogeneity_correction
    )
    .unwrap();
    if result.information_size_used != result.required_information_size {
        writeln!(
            out,
            "    RIS: {} patients (I²-adjusted from {})",
            result.information_size_used, result.required_information_size
        )
        .unwrap();
    } else {
        writeln!(out, "    RIS: {} patients", result.required_information_size).unwrap();
    }
    let accrued = format!(
        "{} patients accrued ({:.1}% of RIS)",
        result.total_patients(),
        result
            .final_record()
            .map(|r| r.information_fraction * 100.0)
            .unwrap_or(0.0)
    );
    if result.information_size_reached() {
        writeln!(out, "    {}", green(&accrued)).unwrap();
    } else {
        writeln!(out, "    {}", accrued).unwrap();
    }
    writeln!(out).unwrap();
}

fn format_pooled(out: &mut String, result: &TsaResult) {
    let pooled = &result.pooled;
    writeln!(out, "  {}", bold("Pooled estimate (Mantel-Haenszel):")).unwrap();
    writeln!(
        out,
        "    OR = {} (95% CI {} to {}), {} of {} studies pooled",
        fmt_ratio(pooled.odds_ratio),
        fmt_ratio(pooled.ci_lower),
        fmt_ratio(pooled.ci_upper),
        pooled.studies_pooled,
        result.records.len()
    )
    .unwrap();
    if !pooled.is_informative() {
        writeln!(
            out,
            "    {}",
            dim("No informative studies: the pooled estimate is undefined.")
        )
        .unwrap();
    }
    writeln!(out).unwrap();
}

fn format_trace_row(out: &mut String, record: &CumulativeRecord) {
    let state = match record.state {
        MonitoringState::BoundaryCrossedBenefit => green(record.state.as_str()),
        MonitoringState::BoundaryCrossedHarm => red(record.state.as_str()),
        MonitoringState::FutilityDeclared => yellow(record.state.as_str()),
        MonitoringState::Continuing => dim(record.state.as_str()),
    };
    let ci = format!(
        "{} ({}-{})",
        fmt_ratio(record.odds_ratio),
        fmt_ratio(record.ci_lower),
        fmt_ratio(record.ci_upper)
    );
    writeln!(
        out,
        "    {:>3}  {:<20} {:>4} {:>8} {:>7.3} {:>7.2} {:>7.2} {:>7.2} {:>17} {:>7.4}  {}",
        record.index + 1,
        truncate(&record.study_name, 20),
        record.year,
        record.cumulative_patients,
        record.information_fraction,
        record.z_statistic,
        record.monitoring_boundary,
        record.futility_boundary,
        ci,
        record.alpha_spent,
        state
    )
    .unwrap();
}

// ============================================================================
// Helpers
// ============================================================================

/// Format a ratio with two decimals, spelling out the unbounded cases.
fn fmt_ratio(x: f64) -> String {
    if x.is_infinite() {
        String::from("inf")
    } else if x.is_nan() {
        String::from("n/a")
    } else {
        format!("{:.2}", x)
    }
}

/// Truncate to at most `max` characters, marking the cut with an ellipsis.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return String::from(s);
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

/// Greedy word wrap.
fn wrap_text(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut line_len = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if line_len > 0 && line_len + 1 + len > width {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(word);
        line_len += len;
    }
    out
}
