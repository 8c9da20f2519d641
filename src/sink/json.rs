//! JSON snapshot sink: one pretty-printed document, replaced wholesale.

use std::fs;
use std::path::{Path, PathBuf};

use crate::model::HotelRecord;
use crate::sink::SinkError;

/// Snapshot file name inside the output directory.
pub const SNAPSHOT_FILE: &str = "hotels_valid.json";

/// Serialize the valid set and overwrite the snapshot file.
///
/// The document is a pretty-printed array of objects keyed by field name.
/// Non-ASCII text is written as-is rather than `\u` escaped, and the same
/// valid set always produces the same bytes.
pub fn write_snapshot(records: &[HotelRecord], out_dir: &Path) -> Result<PathBuf, SinkError> {
    let path = out_dir.join(SNAPSHOT_FILE);
    let body = serde_json::to_vec_pretty(records)
        .map_err(|err| SinkError::Serialize { detail: err.to_string() })?;
    fs::write(&path, body).map_err(|err| SinkError::Write {
        path: path.clone(),
        detail: err.to_string(),
    })?;
    Ok(path)
}
