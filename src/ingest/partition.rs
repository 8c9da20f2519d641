//! Single-pass partitioning of data records into valid and invalid sets.

use csv::{ByteRecord, ReaderBuilder};

use crate::ingest::fatal::FatalError;
use crate::ingest::header::{normalize_header, require_columns};
use crate::ingest::input::strip_utf8_bom;
use crate::model::{FieldMap, HotelRecord, InvalidRow};
use crate::validate::row::{validate_row, RowOutcome};
use crate::validate::violation::RowIssue;

/// Everything one processing pass produced. Every data record lands in
/// exactly one of the two sets.
#[derive(Debug, Default)]
pub struct Partitioned {
    /// Trimmed header names in file order.
    pub headers: Vec<String>,
    pub valid: Vec<HotelRecord>,
    pub invalid: Vec<InvalidRow>,
}

/// Dataset reader: RFC 4180 quoting, no implicit header handling, and rows
/// free to differ in width. Width mismatches are data here, not parse
/// errors.
fn build_reader(input: &[u8]) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input)
}

/// Partition CSV bytes into valid records and rejected rows.
///
/// Line numbers are source line numbers: the header starts on line 1 and
/// embedded newlines in quoted cells advance the count. A fully blank line
/// is itself a structurally invalid row, reported at its own line as a
/// single empty cell against the header width.
pub fn partition(input: &[u8]) -> Result<Partitioned, FatalError> {
    let input = strip_utf8_bom(input);
    let mut reader = build_reader(input);
    let mut record = ByteRecord::new();

    let headers = match reader.read_byte_record(&mut record) {
        Ok(true) => normalize_header(&record),
        Ok(false) => return Err(FatalError::EmptyHeader),
        Err(err) => return Err(FatalError::FileUnreadable { detail: err.to_string() }),
    };
    if headers.is_empty() {
        return Err(FatalError::EmptyHeader);
    }
    require_columns(&headers)?;

    let mut valid = Vec::new();
    let mut invalid = Vec::new();
    // The reader skips blank lines without yielding a record; they sit in
    // the byte range between `cursor` and the next record it returns.
    let mut next_line = reader.position().line();
    let mut cursor = reader.position().byte() as usize;

    loop {
        match reader.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => return Err(FatalError::FileUnreadable { detail: err.to_string() }),
        }

        let blanks = leading_blank_lines(&input[cursor..]);
        for offset in 0..blanks {
            invalid.push(blank_row(next_line + offset, headers.len()));
        }
        let line = next_line + blanks;

        if record.len() != headers.len() {
            invalid.push(InvalidRow {
                line,
                values: padded_values(&record, headers.len()),
                issues: vec![RowIssue::ColumnCount {
                    expected: headers.len(),
                    received: record.len(),
                }],
            });
        } else {
            let fields: Vec<Vec<u8>> = record.iter().map(Vec::from).collect();
            match validate_row(FieldMap::new(&headers, &fields), line) {
                RowOutcome::Valid(hotel) => valid.push(hotel),
                RowOutcome::Invalid(violations) => invalid.push(InvalidRow {
                    line,
                    values: decoded_values(&record),
                    issues: violations.into_iter().map(RowIssue::Field).collect(),
                }),
            }
        }

        next_line = reader.position().line();
        cursor = reader.position().byte() as usize;
    }

    // Blank lines at the end of the file have no record after them.
    for offset in 0..leading_blank_lines(&input[cursor..]) {
        invalid.push(blank_row(next_line + offset, headers.len()));
    }

    Ok(Partitioned { headers, valid, invalid })
}

/// Count the fully blank lines at the start of `region`.
fn leading_blank_lines(region: &[u8]) -> u64 {
    let mut rest = region;
    let mut blanks = 0;
    loop {
        rest = if let Some(after) = rest.strip_prefix(b"\r\n") {
            after
        } else if let Some(after) = rest.strip_prefix(b"\n") {
            after
        } else {
            return blanks;
        };
        blanks += 1;
    }
}

/// A blank line reads as one empty cell, so it is a one-cell row against
/// the header width.
fn blank_row(line: u64, width: usize) -> InvalidRow {
    InvalidRow {
        line,
        values: vec![None; width],
        issues: vec![RowIssue::ColumnCount { expected: width, received: 1 }],
    }
}

/// All received cells, padded with `None` up to the header width. A row
/// wider than the header keeps its extra cells.
fn padded_values(record: &ByteRecord, width: usize) -> Vec<Option<String>> {
    let mut values = decoded_values(record);
    if values.len() < width {
        values.resize(width, None);
    }
    values
}

fn decoded_values(record: &ByteRecord) -> Vec<Option<String>> {
    record
        .iter()
        .map(|cell| Some(String::from_utf8_lossy(cell).into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::violation::{Field, ViolationKind};

    #[test]
    fn short_row_is_structural_and_skips_field_checks() {
        let input = b"name,uri,stars\nGrand Hotel,http://grand.example\n";
        let result = partition(input).expect("partition");
        assert!(result.valid.is_empty());
        assert_eq!(result.invalid.len(), 1);

        let row = &result.invalid[0];
        assert_eq!(row.line, 2);
        assert_eq!(row.issues, vec![RowIssue::ColumnCount { expected: 3, received: 2 }]);
        assert_eq!(
            row.values,
            vec![
                Some("Grand Hotel".to_string()),
                Some("http://grand.example".to_string()),
                None,
            ],
        );
    }

    #[test]
    fn wide_row_keeps_its_extra_cells() {
        let input = b"name,uri,stars\nGrand,http://g.example,4,extra\n";
        let result = partition(input).expect("partition");
        let row = &result.invalid[0];
        assert_eq!(row.values.len(), 4);
        assert_eq!(row.values[3].as_deref(), Some("extra"));
    }

    #[test]
    fn blank_line_is_a_structural_reject_at_its_own_line() {
        let input = b"name,uri,stars\n\n,bad-url,9\n";
        let result = partition(input).expect("partition");
        assert!(result.valid.is_empty());

        let lines: Vec<u64> = result.invalid.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 3]);

        let blank = &result.invalid[0];
        assert_eq!(blank.values, vec![None, None, None]);
        assert_eq!(blank.issues, vec![RowIssue::ColumnCount { expected: 3, received: 1 }]);
    }

    #[test]
    fn rows_after_blank_lines_keep_their_source_lines() {
        let input = b"name,uri,stars\n\n\nGrand,http://grand.example,4\n,bad-url,9\n";
        let result = partition(input).expect("partition");

        assert_eq!(result.valid.len(), 1);
        let lines: Vec<u64> = result.invalid.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![2, 3, 5]);
    }

    #[test]
    fn trailing_blank_lines_are_reported() {
        let input = b"name,uri,stars\nGrand,http://grand.example,4\n\r\n\n";
        let result = partition(input).expect("partition");

        assert_eq!(result.valid.len(), 1);
        let lines: Vec<u64> = result.invalid.iter().map(|row| row.line).collect();
        assert_eq!(lines, vec![3, 4]);
    }

    #[test]
    fn quoted_cells_carry_delimiters_and_newlines() {
        let input = b"name,uri,stars,address\n\"Grand, The\",http://grand.example,4,\"1 Main St\nFloor 2\"\n,bad-url,9,\n";
        let result = partition(input).expect("partition");
        assert_eq!(result.valid[0].name, "Grand, The");
        assert_eq!(result.valid[0].address.as_deref(), Some("1 Main St\nFloor 2"));

        // The quoted record spans source lines 2 and 3.
        assert_eq!(result.invalid.len(), 1);
        assert_eq!(result.invalid[0].line, 4);
    }

    #[test]
    fn padded_uri_cell_rejects_the_row() {
        let input = b"name,uri,stars\nGrand Hotel, http://grand.example ,4\n";
        let result = partition(input).expect("partition");
        assert!(result.valid.is_empty());

        let row = &result.invalid[0];
        assert_eq!(row.line, 2);
        match &row.issues[..] {
            [RowIssue::Field(violation)] => {
                assert_eq!(violation.field, Field::Uri);
                assert_eq!(violation.kind, ViolationKind::FormatError);
            }
            other => panic!("unexpected issues {other:?}"),
        }
    }

    #[test]
    fn bom_does_not_mask_the_first_header() {
        let input = b"\xEF\xBB\xBFname,uri,stars\nGrand,http://grand.example,4\n";
        let result = partition(input).expect("partition");
        assert_eq!(result.headers[0], "name");
        assert_eq!(result.valid.len(), 1);
    }

    #[test]
    fn empty_input_is_a_missing_header() {
        match partition(b"") {
            Err(FatalError::EmptyHeader) => {}
            other => panic!("expected EmptyHeader, got {other:?}"),
        }
    }

    #[test]
    fn missing_mandatory_column_is_fatal() {
        let input = b"name,stars\nGrand,4\n";
        match partition(input) {
            Err(FatalError::MissingColumn { name }) => assert_eq!(name, "uri"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn mixed_file_partitions_every_data_row() {
        let input = b"name,uri,stars\nGrand Hotel,http://grand.example,4\n,bad-url,9\n";
        let result = partition(input).expect("partition");
        assert_eq!(result.valid.len(), 1);
        assert_eq!(result.valid[0].name, "Grand Hotel");

        assert_eq!(result.invalid.len(), 1);
        let row = &result.invalid[0];
        assert_eq!(row.line, 3);
        let kinds: Vec<(ViolationKind, Field)> = row
            .issues
            .iter()
            .map(|issue| match issue {
                RowIssue::Field(v) => (v.kind, v.field),
                other => panic!("unexpected issue {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (ViolationKind::MissingField, Field::Name),
                (ViolationKind::FormatError, Field::Uri),
                (ViolationKind::RangeError, Field::Stars),
            ],
        );
    }
}
