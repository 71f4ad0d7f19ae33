//! Loading study lists from files.
//!
//! # Supported Formats
//!
//! - **CSV**: header line followed by one study per line, columns
//!   `id,name,year,events_treatment,total_treatment,events_control,total_control`
//! - **JSON**: an array of study objects (snake_case field names, or the
//!   camelCase `eventsTrt`/`totalTrt`/`eventsCtrl`/`totalCtrl` aliases)
//!
//! Every loaded study is checked with [`Study::validate`]. The order of the
//! file is kept; it is the order of the cumulative looks.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use tsa::data::load_studies;
//!
//! let studies = load_studies(Path::new("trials.csv"))?;
//! println!("Loaded {} studies", studies.len());
//! # Ok::<(), tsa::data::DataError>(())
//! ```

mod csv;
mod json;

pub use csv::{load_studies_csv, parse_studies_csv, CSV_HEADER};
pub use json::{load_studies_json, parse_studies_json};

use std::fmt;
use std::path::Path;

use tsa_core::{Study, StudyError};

/// Errors that can occur during data loading.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading file.
    Io(std::io::Error),

    /// Malformed line.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A field that should be a number is not.
    InvalidValue {
        /// Line number where the invalid value was found (1-indexed).
        line: usize,
        /// Column name.
        column: &'static str,
        /// The invalid value string.
        value: String,
    },

    /// A study whose counts are inconsistent.
    InvalidStudy {
        /// Line number of the study (1-indexed), or its position in a JSON
        /// array (1-indexed).
        line: usize,
        /// What is wrong with it.
        source: StudyError,
    },

    /// Malformed JSON.
    Json(serde_json::Error),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            DataError::InvalidValue {
                line,
                column,
                value,
            } => {
                write!(
                    f,
                    "Invalid value for '{}' at line {}: '{}'",
                    column, line, value
                )
            }
            DataError::InvalidStudy { line, source } => {
                write!(f, "Invalid study at line {}: {}", line, source)
            }
            DataError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::InvalidStudy { source, .. } => Some(source),
            DataError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Json(e)
    }
}

/// Load studies from `path`, choosing the format by extension.
///
/// `.json` files are read as JSON; anything else as CSV.
pub fn load_studies(path: &Path) -> Result<Vec<Study>, DataError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let studies = if is_json {
        load_studies_json(path)?
    } else {
        load_studies_csv(path)?
    };

    tracing::info!(
        studies = studies.len(),
        source = %path.display(),
        "loaded studies"
    );
    for study in studies.iter().filter(|s| s.is_double_zero()) {
        tracing::warn!(
            study = %study.id,
            "double-zero study carries no information and is left out of the pooled estimate"
        );
    }

    Ok(studies)
}
