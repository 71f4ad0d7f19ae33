//! CSV export of the cumulative trace.

use std::fmt::Write;

use tsa_core::{CumulativeRecord, TsaResult};

/// Header row of [`trace_to_csv`].
pub const TRACE_HEADER: &str = "index,study_id,study_name,year,cumulative_patients,\
information_fraction,z_statistic,monitoring_boundary,futility_boundary,\
odds_ratio,ci_lower,ci_upper,alpha_spent,beta_spent,state";

/// Render the trace as CSV: a header row then one row per record.
///
/// Non-finite values are written as `inf`/`-inf`; study names containing
/// commas or quotes are quoted.
pub fn trace_to_csv(result: &TsaResult) -> String {
    let mut out = String::new();
    writeln!(out, "{}", TRACE_HEADER).unwrap();
    for record in &result.records {
        write_row(&mut out, record);
    }
    out
}

fn write_row(out: &mut String, r: &CumulativeRecord) {
    writeln!(
        out,
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        r.index + 1,
        quote(&r.study_id),
        quote(&r.study_name),
        r.year,
        r.cumulative_patients,
        num(r.information_fraction),
        num(r.z_statistic),
        num(r.monitoring_boundary),
        num(r.futility_boundary),
        num(r.odds_ratio),
        num(r.ci_lower),
        num(r.ci_upper),
        num(r.alpha_spent),
        num(r.beta_spent),
        r.state
    )
    .unwrap();
}

fn num(x: f64) -> String {
    if x.is_finite() {
        format!("{:.6}", x)
    } else if x.is_nan() {
        String::from("nan")
    } else if x > 0.0 {
        String::from("inf")
    } else {
        String::from("-inf")
    }
}

fn quote(s: &str) -> String {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\n')) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
