//! Tagged row-failure variants.
//!
//! Callers branch on `ViolationKind` and `Field` instead of parsing message
//! text; the message is for humans and travels with the variant.

use std::fmt;

/// Mandatory columns checked by the row validator, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Uri,
    Stars,
}

impl Field {
    /// Every mandatory column, in the order violations are reported.
    pub const ALL: [Field; 3] = [Field::Name, Field::Uri, Field::Stars];

    /// The column name as it must appear in the header row.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Uri => "uri",
            Field::Stars => "stars",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a mandatory field check can fail with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The field is absent or contains only whitespace.
    MissingField,
    /// The field is not valid UTF-8 text.
    EncodingError,
    /// The field is present but not in the expected shape.
    FormatError,
    /// The field parsed but falls outside the allowed range.
    RangeError,
}

impl ViolationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::EncodingError => "encoding_error",
            ViolationKind::FormatError => "format_error",
            ViolationKind::RangeError => "range_error",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-rule failure on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub field: Field,
    /// 1-based source line number of the offending row.
    pub line: u64,
    pub message: &'static str,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Why a data row was excluded from the valid set.
#[derive(Debug, Clone, PartialEq)]
pub enum RowIssue {
    /// The row's field count disagreed with the header; field checks never
    /// ran for such a row.
    ColumnCount { expected: usize, received: usize },
    /// A mandatory field failed its rule.
    Field(Violation),
}

impl RowIssue {
    /// The human-readable reason, without the line number.
    pub fn message(&self) -> String {
        match self {
            RowIssue::ColumnCount { expected, received } => {
                format!("column count mismatch: expected {expected}, received {received}")
            }
            RowIssue::Field(violation) => violation.message.to_string(),
        }
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
