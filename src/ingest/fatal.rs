//! Conditions that abort processing before any row-level output exists.

use std::fmt;
use std::path::PathBuf;

/// Fatal pipeline errors. When one of these occurs nothing was partitioned
/// and no sink runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FatalError {
    /// The input path does not exist.
    FileNotFound { path: PathBuf },
    /// The input exists but could not be read as CSV text.
    FileUnreadable { detail: String },
    /// The input has no header row.
    EmptyHeader,
    /// A mandatory column is absent from the header row.
    MissingColumn { name: &'static str },
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::FileNotFound { path } => {
                write!(f, "CSV file not found: {}", path.display())
            }
            FatalError::FileUnreadable { detail } => {
                write!(f, "CSV input could not be read: {detail}")
            }
            FatalError::EmptyHeader => write!(f, "CSV header row is missing or empty"),
            FatalError::MissingColumn { name } => {
                write!(f, "required CSV header missing: '{name}'")
            }
        }
    }
}

impl std::error::Error for FatalError {}
