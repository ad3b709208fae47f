use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Verify,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::Load => "load",
            Stage::Verify => "verify",
            Stage::Write => "write",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum CrateError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required CSV header '{column}' in {path:?}")]
    MissingHeader { column: String, path: PathBuf },

    #[error("Row {row} of {path:?} has {fields} fields but the header has {expected}")]
    OverlongRow {
        path: PathBuf,
        row: usize,
        fields: usize,
        expected: usize,
    },

    #[error("API request error: {0}")]
    ApiRequestError(reqwest::Error),

    #[error("API returned an error status: {status}")]
    ApiStatusError { status: reqwest::StatusCode },

    #[error("Failed to decode API JSON response: {0}")]
    ApiJsonDecodeError(reqwest::Error),

    #[error("Verifier returned {actual} entries for {expected} queried names")]
    ResponseCountMismatch { expected: usize, actual: usize },

    #[error("Verifier entry {index} echoes '{supplied}' but '{expected}' was queried at that position")]
    ResponseMisaligned {
        index: usize,
        expected: String,
        supplied: String,
    },

    #[error("Failed to write output {path:?}: {source}")]
    WriteError { path: PathBuf, source: csv::Error },
}

impl CrateError {
    pub fn stage(&self) -> Stage {
        match self {
            CrateError::CsvError(_)
            | CrateError::MissingHeader { .. }
            | CrateError::OverlongRow { .. } => Stage::Load,
            CrateError::ApiRequestError(_)
            | CrateError::ApiStatusError { .. }
            | CrateError::ApiJsonDecodeError(_)
            | CrateError::ResponseCountMismatch { .. }
            | CrateError::ResponseMisaligned { .. } => Stage::Verify,
            CrateError::WriteError { .. } => Stage::Write,
        }
    }
}

pub type Result<T> = std::result::Result<T, CrateError>;
