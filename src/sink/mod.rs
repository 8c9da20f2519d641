//! Persistence sinks. Each sink fully replaces its prior contents from the
//! current valid set; nothing is merged across runs.

pub mod json;
pub mod sqlite;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Sink failures. The pipeline reports these per sink instead of aborting,
/// so one sink failing never hides the other's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The valid set could not be serialized.
    Serialize { detail: String },
    /// Filesystem write failure.
    Write { path: PathBuf, detail: String },
    /// Database open, schema, or statement failure.
    Database { path: PathBuf, detail: String },
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Serialize { detail } => {
                write!(f, "could not serialize the dataset: {detail}")
            }
            SinkError::Write { path, detail } => {
                write!(f, "could not write {}: {detail}", path.display())
            }
            SinkError::Database { path, detail } => {
                write!(f, "database error at {}: {detail}", path.display())
            }
        }
    }
}

impl std::error::Error for SinkError {}

/// Outcome of one sink attempt, in the shape callers see.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SinkReport {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SinkReport {
    pub fn ok(message: impl Into<String>, path: PathBuf) -> Self {
        Self { success: true, message: message.into(), path: Some(path) }
    }

    pub fn failed(error: &SinkError) -> Self {
        Self { success: false, message: error.to_string(), path: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn failed_report_carries_the_error_text_and_no_path() {
        let error = SinkError::Write {
            path: Path::new("output/hotels_valid.json").to_path_buf(),
            detail: "permission denied".to_string(),
        };
        let report = SinkReport::failed(&error);
        assert!(!report.success);
        assert!(report.message.contains("hotels_valid.json"));
        assert_eq!(report.path, None);
    }

    #[test]
    fn ok_report_serializes_with_a_path() {
        let report = SinkReport::ok("saved", Path::new("output/hotels.sqlite").to_path_buf());
        let value = serde_json::to_value(&report).expect("json");
        assert_eq!(value["success"], true);
        assert_eq!(value["path"], "output/hotels.sqlite");
    }

    #[test]
    fn failed_report_omits_the_path_key() {
        let error = SinkError::Serialize { detail: "boom".to_string() };
        let value = serde_json::to_value(SinkReport::failed(&error)).expect("json");
        assert!(value.get("path").is_none());
    }
}
