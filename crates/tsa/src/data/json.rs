//! JSON parsing for study lists.

use std::fs;
use std::path::Path;

use tsa_core::Study;

use super::DataError;

/// Load studies from a JSON file holding an array of study objects.
pub fn load_studies_json(path: &Path) -> Result<Vec<Study>, DataError> {
    let text = fs::read_to_string(path)?;
    parse_studies_json(&text)
}

/// Parse and validate a JSON array of studies.
///
/// Validation errors report the 1-indexed position of the study in the array
/// as their line.
pub fn parse_studies_json(text: &str) -> Result<Vec<Study>, DataError> {
    let studies: Vec<Study> = serde_json::from_str(text)?;
    for (i, study) in studies.iter().enumerate() {
        study.validate().map_err(|source| DataError::InvalidStudy {
            line: i + 1,
            source,
        })?;
    }
    Ok(studies)
}
