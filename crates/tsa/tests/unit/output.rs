//! Tests for the JSON, CSV and terminal renderings.

use serde_json::Value;
use tsa::output::{
    format_debug_summary, format_heterogeneity, format_result, format_trace_table, to_json,
    to_json_pretty, trace_to_csv, TRACE_HEADER,
};
use tsa::{Study, TrialSequentialAnalysis, TsaResult};

fn result() -> TsaResult {
    let studies = vec![
        Study::new("s1", "Smith", 1998, 12, 150, 22, 148),
        Study::new("s2", "Jones, Sr.", 2003, 30, 400, 48, 402),
        Study::new("s3", "Lee", 2009, 9, 120, 15, 118),
    ];
    TrialSequentialAnalysis::new()
        .control_rate(0.15)
        .relative_risk_reduction(35.0)
        .heterogeneity_correction(1.2)
        .run_checked(&studies)
        .unwrap()
}

#[test]
fn json_carries_the_whole_trace() {
    let result = result();
    let value: Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();

    let records = value["records"].as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1]["study_name"], "Jones, Sr.");
    assert_eq!(
        value["required_information_size"].as_u64(),
        Some(result.required_information_size)
    );
    assert!(value["interpretation"]["title"].is_string());
    assert!(value["heterogeneity"]["i_squared"].is_number());
}

#[test]
fn pretty_json_is_equivalent() {
    let result = result();
    let compact: Value = serde_json::from_str(&to_json(&result).unwrap()).unwrap();
    let pretty_text = to_json_pretty(&result).unwrap();
    let pretty: Value = serde_json::from_str(&pretty_text).unwrap();
    assert!(pretty_text.contains('\n'));
    assert_eq!(compact, pretty);
}

#[test]
fn csv_has_a_row_per_record() {
    let result = result();
    let csv = trace_to_csv(&result);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], TRACE_HEADER);
    assert_eq!(lines.len(), 1 + result.records.len());
    assert!(lines[1].starts_with("1,s1,Smith,1998,298,"));
    // Names with commas are quoted
    assert!(lines[2].contains("\"Jones, Sr.\""));
}

#[test]
fn terminal_report_names_every_study() {
    let result = result();
    let table = format_trace_table(&result);
    for name in ["Smith", "Jones", "Lee"] {
        assert!(table.contains(name), "missing {} in\n{}", name, table);
    }

    let report = format_result(&result);
    assert!(report.contains(&result.interpretation.title));
    assert!(format_heterogeneity(&result.heterogeneity).contains("I²"));
}

#[test]
fn debug_summary_is_compact() {
    let summary = format_debug_summary(&result());
    assert!(summary.starts_with("TsaResult {"));
    assert!(summary.contains("studies: 3"));
    assert!(summary.trim_end().ends_with('}'));
}
