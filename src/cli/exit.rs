//! Exit codes & stdout/stderr routing.

/// Domain outcome of one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every data row entered the valid set and both sinks succeeded.
    Clean,
    /// Some rows were rejected; the valid set still reached both sinks.
    Partial,
    /// Fatal processing error, or a sink failed.
    Failed,
}

/// Output mode chosen by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

/// Target stream for output emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Exit code for a given outcome (domain-level only).
pub fn exit_code(outcome: Outcome) -> u8 {
    match outcome {
        Outcome::Clean => 0,
        Outcome::Partial => 1,
        Outcome::Failed => 2,
    }
}

/// Output stream for a given outcome and output mode.
///
/// In JSON mode, all domain outcomes go to stdout.
/// In human mode, failures go to stderr.
pub fn output_stream(outcome: Outcome, mode: OutputMode) -> OutputStream {
    match (mode, outcome) {
        (OutputMode::Json, _) => OutputStream::Stdout,
        (OutputMode::Human, Outcome::Failed) => OutputStream::Stderr,
        (OutputMode::Human, _) => OutputStream::Stdout,
    }
}
