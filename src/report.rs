//! Import reports: serializable summaries plus the human rendering.

use serde::Serialize;

use crate::cli::exit::Outcome;
use crate::ingest::fatal::FatalError;
use crate::ingest::partition::Partitioned;
use crate::model::InvalidRow;
use crate::sink::SinkReport;

/// Row-level counts plus fatal errors.
///
/// `errors` is empty whenever row processing ran; a fatal error means the
/// counts are zero and nothing was partitioned.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingSummary {
    pub valid_count: usize,
    pub invalid_count: usize,
    pub errors: Vec<String>,
}

/// One rejected row as reported to callers.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub line: u64,
    pub values: Vec<Option<String>>,
    pub reasons: Vec<String>,
}

impl RejectedRow {
    fn from_invalid(row: &InvalidRow) -> Self {
        Self {
            line: row.line,
            values: row.values.clone(),
            reasons: row.issues.iter().map(|issue| issue.message()).collect(),
        }
    }
}

/// Per-sink outcomes of one import run.
#[derive(Debug, Clone, Serialize)]
pub struct SaveResults {
    pub json: SinkReport,
    pub sqlite: SinkReport,
}

/// Everything one import run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    #[serde(flatten)]
    pub summary: ProcessingSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_rows: Vec<RejectedRow>,
    /// Absent when processing failed before the sinks ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_results: Option<SaveResults>,
}

impl ImportReport {
    pub fn fatal(error: &FatalError) -> Self {
        Self {
            summary: ProcessingSummary {
                valid_count: 0,
                invalid_count: 0,
                errors: vec![error.to_string()],
            },
            invalid_rows: Vec::new(),
            save_results: None,
        }
    }

    pub fn completed(outcome: &Partitioned, json: SinkReport, sqlite: SinkReport) -> Self {
        Self {
            summary: ProcessingSummary {
                valid_count: outcome.valid.len(),
                invalid_count: outcome.invalid.len(),
                errors: Vec::new(),
            },
            invalid_rows: outcome.invalid.iter().map(RejectedRow::from_invalid).collect(),
            save_results: Some(SaveResults { json, sqlite }),
        }
    }

    /// Map the report to the domain outcome driving the exit code.
    pub fn outcome(&self) -> Outcome {
        let sinks_ok = self
            .save_results
            .as_ref()
            .is_some_and(|saves| saves.json.success && saves.sqlite.success);
        if !self.summary.errors.is_empty() || !sinks_ok {
            Outcome::Failed
        } else if self.summary.invalid_count > 0 {
            Outcome::Partial
        } else {
            Outcome::Clean
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Render the report as human-readable lines, one line per rejected-row
/// reason.
pub fn render_human(report: &ImportReport) -> Vec<String> {
    if let Some(error) = report.summary.errors.first() {
        return vec!["HOTELIER ERROR".to_string(), String::new(), error.clone()];
    }

    let banner = match report.outcome() {
        Outcome::Clean => "IMPORT CLEAN",
        Outcome::Partial => "IMPORT WITH REJECTS",
        Outcome::Failed => "IMPORT FAILED",
    };
    let mut lines = vec![
        "HOTELIER".to_string(),
        String::new(),
        banner.to_string(),
        String::new(),
    ];
    lines.push(format!("valid rows:   {}", report.summary.valid_count));
    lines.push(format!("invalid rows: {}", report.summary.invalid_count));
    for row in &report.invalid_rows {
        for reason in &row.reasons {
            lines.push(format!("  line {}: {reason}", row.line));
        }
    }
    if let Some(saves) = &report.save_results {
        lines.push(String::new());
        lines.push(sink_line("json sink:  ", &saves.json));
        lines.push(sink_line("sqlite sink:", &saves.sqlite));
    }
    lines
}

fn sink_line(label: &str, report: &SinkReport) -> String {
    match &report.path {
        Some(path) if report.success => format!("{label} saved {}", path.display()),
        _ => format!("{label} FAILED ({})", report.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::sink::SinkError;
    use crate::validate::violation::RowIssue;

    fn partitioned_with_one_reject() -> Partitioned {
        Partitioned {
            headers: vec!["name".to_string(), "uri".to_string(), "stars".to_string()],
            valid: Vec::new(),
            invalid: vec![InvalidRow {
                line: 2,
                values: vec![Some("Grand".to_string()), None, None],
                issues: vec![RowIssue::ColumnCount { expected: 3, received: 1 }],
            }],
        }
    }

    fn ok_sinks() -> (SinkReport, SinkReport) {
        (
            SinkReport::ok("saved", PathBuf::from("out/hotels_valid.json")),
            SinkReport::ok("saved", PathBuf::from("out/hotels.sqlite")),
        )
    }

    #[test]
    fn fatal_report_has_no_save_results() {
        let report = ImportReport::fatal(&FatalError::EmptyHeader);
        assert_eq!(report.outcome(), Outcome::Failed);
        let value = serde_json::to_value(&report).expect("json");
        assert_eq!(value["valid_count"], 0);
        assert!(value.get("save_results").is_none());
        assert_eq!(value["errors"][0], "CSV header row is missing or empty");
    }

    #[test]
    fn rejects_map_to_partial_outcome() {
        let (json, sqlite) = ok_sinks();
        let report = ImportReport::completed(&partitioned_with_one_reject(), json, sqlite);
        assert_eq!(report.outcome(), Outcome::Partial);
        assert_eq!(report.invalid_rows[0].reasons.len(), 1);
    }

    #[test]
    fn sink_failure_maps_to_failed_outcome() {
        let error = SinkError::Serialize { detail: "boom".to_string() };
        let (json, _) = ok_sinks();
        let report =
            ImportReport::completed(&Partitioned::default(), json, SinkReport::failed(&error));
        assert_eq!(report.outcome(), Outcome::Failed);
    }

    #[test]
    fn clean_run_renders_banner_counts_and_sink_lines() {
        let (json, sqlite) = ok_sinks();
        let report = ImportReport::completed(&Partitioned::default(), json, sqlite);
        assert_eq!(report.outcome(), Outcome::Clean);

        let lines = render_human(&report);
        assert_eq!(lines[0], "HOTELIER");
        assert_eq!(lines[2], "IMPORT CLEAN");
        assert_eq!(lines[4], "valid rows:   0");
        assert_eq!(lines[5], "invalid rows: 0");
        assert!(lines[7].contains("hotels_valid.json"));
        assert!(lines[8].contains("hotels.sqlite"));
    }

    #[test]
    fn rejects_are_rendered_one_reason_per_line() {
        let (json, sqlite) = ok_sinks();
        let report = ImportReport::completed(&partitioned_with_one_reject(), json, sqlite);
        let lines = render_human(&report);
        assert_eq!(lines[2], "IMPORT WITH REJECTS");
        assert!(
            lines
                .iter()
                .any(|line| line == "  line 2: column count mismatch: expected 3, received 1")
        );
    }

    #[test]
    fn fatal_rendering_is_banner_plus_message() {
        let report = ImportReport::fatal(&FatalError::MissingColumn { name: "stars" });
        let lines = render_human(&report);
        assert_eq!(
            lines,
            vec![
                "HOTELIER ERROR".to_string(),
                String::new(),
                "required CSV header missing: 'stars'".to_string(),
            ],
        );
    }
}
