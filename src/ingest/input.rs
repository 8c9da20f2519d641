//! Input intake: whole-file read and byte-order-mark stripping.

use std::io::ErrorKind;
use std::path::Path;

use crate::ingest::fatal::FatalError;

/// UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Strip a single leading UTF-8 BOM. Spreadsheet exports routinely carry
/// one, and it would otherwise corrupt the first header name.
pub fn strip_utf8_bom(input: &[u8]) -> &[u8] {
    input.strip_prefix(&UTF8_BOM).unwrap_or(input)
}

/// Read the whole CSV file, distinguishing an absent path from an
/// unreadable one.
pub fn read_input(path: &Path) -> Result<Vec<u8>, FatalError> {
    std::fs::read(path).map_err(|err| {
        if err.kind() == ErrorKind::NotFound {
            FatalError::FileNotFound { path: path.to_path_buf() }
        } else {
            FatalError::FileUnreadable {
                detail: format!("{}: {err}", path.display()),
            }
        }
    })
}
