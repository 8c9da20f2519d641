//! Core dataset types shared by the validator, the sinks, and the callers.

use serde::{Deserialize, Serialize};

use crate::validate::violation::RowIssue;

/// A hotel row that passed every mandatory field check.
///
/// `name`, `uri`, and `stars` are guaranteed valid; the passthrough fields
/// are copied as-is and may be absent when the source file has no such
/// column. Snapshot serialization omits absent passthrough fields, matching
/// the row-to-object mapping of the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelRecord {
    pub name: String,
    pub uri: String,
    pub stars: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A data row excluded from the valid set.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRow {
    /// 1-based source line number; the header row is line 1.
    pub line: u64,
    /// Raw cell text, padded with `None` up to the header width when the
    /// row came up short. Indexes align with the header cells.
    pub values: Vec<Option<String>>,
    /// Why the row was excluded. Never empty; field issues keep declaration
    /// order (name, uri, stars).
    pub issues: Vec<RowIssue>,
}

/// One row of the published dataset as read back from the relational sink.
///
/// Field order follows the read-path projection. Nullable columns stay
/// explicit `null`s when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetRow {
    pub name: String,
    pub address: Option<String>,
    pub stars: f64,
    pub uri: String,
    pub contact: Option<String>,
    pub phone: Option<String>,
}

/// Column-name lookup over one width-matched data row.
///
/// Header order defines key order; when a header name repeats, the last
/// occurrence wins, as in a map built by inserting the columns left to
/// right. Constructed only for rows whose field count equals the header's.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap<'a> {
    headers: &'a [String],
    fields: &'a [Vec<u8>],
}

impl<'a> FieldMap<'a> {
    pub fn new(headers: &'a [String], fields: &'a [Vec<u8>]) -> Self {
        debug_assert_eq!(headers.len(), fields.len());
        Self { headers, fields }
    }

    /// Raw bytes of the named column, or `None` when the column is absent.
    pub fn get(&self, name: &str) -> Option<&'a [u8]> {
        let index = self.headers.iter().rposition(|header| header == name)?;
        self.fields.get(index).map(Vec::as_slice)
    }

    /// Lossily decoded text of the named column. Used for the passthrough
    /// fields, which are never validated.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|raw| String::from_utf8_lossy(raw).into_owned())
    }
}
