//! Top-level error type for checked analysis runs and the CLI.

use std::fmt;

use tsa_core::{BoundaryError, ParameterError, StudyError};

use crate::data::DataError;

/// Anything that can stop a checked analysis.
#[derive(Debug)]
pub enum TsaError {
    /// Studies could not be loaded.
    Data(DataError),

    /// A design parameter is out of range.
    Parameter(ParameterError),

    /// A study violates the 2×2 count invariants.
    Study(StudyError),

    /// The futility policy has no boundary implementation.
    Boundary(BoundaryError),

    /// There are no studies to analyze.
    EmptyStudyList,
}

impl fmt::Display for TsaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsaError::Data(e) => write!(f, "{}", e),
            TsaError::Parameter(e) => write!(f, "Invalid design: {}", e),
            TsaError::Study(e) => write!(f, "Invalid study: {}", e),
            TsaError::Boundary(e) => write!(f, "{}", e),
            TsaError::EmptyStudyList => write!(f, "no studies to analyze"),
        }
    }
}

impl std::error::Error for TsaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TsaError::Data(e) => Some(e),
            TsaError::Parameter(e) => Some(e),
            TsaError::Study(e) => Some(e),
            TsaError::Boundary(e) => Some(e),
            TsaError::EmptyStudyList => None,
        }
    }
}

impl From<DataError> for TsaError {
    fn from(e: DataError) -> Self {
        TsaError::Data(e)
    }
}

impl From<ParameterError> for TsaError {
    fn from(e: ParameterError) -> Self {
        TsaError::Parameter(e)
    }
}

impl From<StudyError> for TsaError {
    fn from(e: StudyError) -> Self {
        TsaError::Study(e)
    }
}

impl From<BoundaryError> for TsaError {
    fn from(e: BoundaryError) -> Self {
        TsaError::Boundary(e)
    }
}
