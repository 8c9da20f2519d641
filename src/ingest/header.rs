//! Header row normalization and mandatory-column checks.

use csv::ByteRecord;

use crate::ingest::fatal::FatalError;
use crate::validate::violation::Field;

/// Decode and trim the header cells. Decoding is lossy: a mangled header
/// name can never match a mandatory column, which is the failure we want.
pub fn normalize_header(record: &ByteRecord) -> Vec<String> {
    record
        .iter()
        .map(|cell| String::from_utf8_lossy(cell).trim().to_string())
        .collect()
}

/// Verify every mandatory column is present. Matching is case-sensitive
/// and exact; `Name` or `STARS` do not count.
pub fn require_columns(headers: &[String]) -> Result<(), FatalError> {
    for field in Field::ALL {
        if !headers.iter().any(|header| header == field.as_str()) {
            return Err(FatalError::MissingColumn { name: field.as_str() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn header_cells_are_trimmed() {
        let record = ByteRecord::from(vec![" name ", "uri", "stars\t"]);
        assert_eq!(normalize_header(&record), headers(&["name", "uri", "stars"]));
    }

    #[test]
    fn all_mandatory_columns_pass() {
        let full = headers(&["name", "uri", "stars", "address"]);
        assert!(require_columns(&full).is_ok());
    }

    #[test]
    fn first_missing_column_is_reported() {
        let partial = headers(&["name", "stars"]);
        assert_eq!(
            require_columns(&partial),
            Err(FatalError::MissingColumn { name: "uri" }),
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let cased = headers(&["Name", "uri", "stars"]);
        assert_eq!(
            require_columns(&cased),
            Err(FatalError::MissingColumn { name: "name" }),
        );
    }
}
