//! CSV parsing for study lists.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tsa_core::Study;

use super::DataError;

/// Canonical header line, in the column order written by this crate.
pub const CSV_HEADER: &str =
    "id,name,year,events_treatment,total_treatment,events_control,total_control";

/// Required columns and the header names accepted for each.
const COLUMNS: [(&str, &[&str]); 7] = [
    ("id", &["id", "study_id"]),
    ("name", &["name", "study", "study_name"]),
    ("year", &["year"]),
    ("events_treatment", &["events_treatment", "eventstrt", "events_trt"]),
    ("total_treatment", &["total_treatment", "totaltrt", "total_trt"]),
    ("events_control", &["events_control", "eventsctrl", "events_ctrl"]),
    ("total_control", &["total_control", "totalctrl", "total_ctrl"]),
];

/// Load studies from a CSV file.
///
/// The first non-blank, non-comment line is the header; it names the seven
/// required columns in any order. Blank lines and lines starting with `#`
/// are skipped. Fields are comma-separated and trimmed; quoting is not
/// supported, so names must not contain commas.
///
/// # Example file content
/// ```csv
/// id,name,year,events_treatment,total_treatment,events_control,total_control
/// # pilot trials
/// s1,Smith,1998,12,150,22,148
/// s2,Jones,2003,30,400,48,402
/// ```
///
/// # Errors
/// Returns `DataError` if the file cannot be read, a value does not parse,
/// or a study violates the 2×2 count invariants.
pub fn load_studies_csv(path: &Path) -> Result<Vec<Study>, DataError> {
    let file = File::open(path)?;
    parse_lines(BufReader::new(file).lines())
}

/// Parse studies from CSV text. Same format as [`load_studies_csv`].
pub fn parse_studies_csv(text: &str) -> Result<Vec<Study>, DataError> {
    parse_lines(text.lines().map(|line| Ok(line.to_string())))
}

fn parse_lines<I>(lines: I) -> Result<Vec<Study>, DataError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let mut layout: Option<[usize; 7]> = None;
    let mut studies = Vec::new();

    for (line_num, line_result) in lines.enumerate() {
        let line = line_result?;
        let line = line.trim();
        let line_no = line_num + 1;

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let columns = match layout {
            Some(columns) => columns,
            None => {
                layout = Some(parse_header(&fields, line_no)?);
                continue;
            }
        };

        let width = columns.iter().max().copied().unwrap_or(0) + 1;
        if fields.len() < width {
            return Err(DataError::Parse {
                line: line_no,
                message: format!("Expected {} columns, got {}", width, fields.len()),
            });
        }

        let field = |col: usize| fields[columns[col]];
        let study = Study::new(
            field(0),
            field(1),
            parse_number(field(2), line_no, COLUMNS[2].0)?,
            parse_number(field(3), line_no, COLUMNS[3].0)?,
            parse_number(field(4), line_no, COLUMNS[4].0)?,
            parse_number(field(5), line_no, COLUMNS[5].0)?,
            parse_number(field(6), line_no, COLUMNS[6].0)?,
        );

        study.validate().map_err(|source| DataError::InvalidStudy {
            line: line_no,
            source,
        })?;
        studies.push(study);
    }

    Ok(studies)
}

/// Map each required column to its position in the header.
fn parse_header(fields: &[&str], line: usize) -> Result<[usize; 7], DataError> {
    let mut columns = [0usize; 7];
    for (slot, (name, aliases)) in COLUMNS.iter().enumerate() {
        columns[slot] = fields
            .iter()
            .position(|f| aliases.contains(&f.to_ascii_lowercase().as_str()))
            .ok_or_else(|| DataError::Parse {
                line,
                message: format!("Header is missing column '{}'", name),
            })?;
    }
    Ok(columns)
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    line: usize,
    column: &'static str,
) -> Result<T, DataError> {
    value.parse().map_err(|_| DataError::InvalidValue {
        line,
        column,
        value: value.to_string(),
    })
}
