//! End-to-end orchestration: parse, validate, then persist.

use std::path::Path;

use crate::ingest::fatal::FatalError;
use crate::ingest::input::read_input;
use crate::ingest::partition::{partition, Partitioned};
use crate::report::ImportReport;
use crate::sink::{json, sqlite, SinkReport};

/// Parse and validate CSV bytes without touching any sink.
pub fn process_bytes(input: &[u8]) -> Result<Partitioned, FatalError> {
    partition(input)
}

/// Parse and validate a CSV file without touching any sink.
pub fn process_path(path: &Path) -> Result<Partitioned, FatalError> {
    let bytes = read_input(path)?;
    partition(&bytes)
}

/// Process the file and, when processing succeeds, replace both sinks from
/// the same valid set. The sinks are independent: one failing never stops
/// the other, and both outcomes land in the report. A fatal processing
/// error leaves both sinks untouched.
///
/// The snapshot lands at `<out_dir>/hotels_valid.json` and the database at
/// `<out_dir>/hotels.sqlite`.
pub fn import(csv_path: &Path, out_dir: &Path) -> ImportReport {
    let outcome = match process_path(csv_path) {
        Ok(outcome) => outcome,
        Err(fatal) => return ImportReport::fatal(&fatal),
    };

    let snapshot = match json::write_snapshot(&outcome.valid, out_dir) {
        Ok(path) => SinkReport::ok("JSON snapshot saved", path),
        Err(err) => SinkReport::failed(&err),
    };
    let db_path = out_dir.join(sqlite::DATABASE_FILE);
    let database = match sqlite::replace_dataset(&outcome.valid, &db_path) {
        Ok(path) => SinkReport::ok("SQLite database saved", path),
        Err(err) => SinkReport::failed(&err),
    };

    ImportReport::completed(&outcome, snapshot, database)
}
