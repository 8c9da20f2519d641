//! Whole-row validation over a field mapping.

use crate::model::{FieldMap, HotelRecord};
use crate::validate::rules::{parse_name, parse_stars, parse_uri, FieldFault};
use crate::validate::violation::{Field, Violation};

/// Result of validating one width-matched data row.
#[derive(Debug, Clone)]
pub enum RowOutcome {
    Valid(HotelRecord),
    /// At least one mandatory field failed; ordered name, uri, stars.
    Invalid(Vec<Violation>),
}

/// Run every mandatory rule over the row. A failing field never stops the
/// later ones, so one pass reports everything wrong with the row.
pub fn validate_row(row: FieldMap<'_>, line: u64) -> RowOutcome {
    let mut violations = Vec::new();

    let name = collect(
        parse_name(row.get(Field::Name.as_str())),
        Field::Name,
        line,
        &mut violations,
    );
    let uri = collect(
        parse_uri(row.get(Field::Uri.as_str())),
        Field::Uri,
        line,
        &mut violations,
    );
    let stars = collect(
        parse_stars(row.get(Field::Stars.as_str())),
        Field::Stars,
        line,
        &mut violations,
    );

    match (name, uri, stars) {
        (Some(name), Some(uri), Some(stars)) => RowOutcome::Valid(HotelRecord {
            name,
            uri,
            stars,
            address: row.text("address"),
            contact: row.text("contact"),
            phone: row.text("phone"),
        }),
        _ => RowOutcome::Invalid(violations),
    }
}

fn collect<T>(
    parsed: Result<T, FieldFault>,
    field: Field,
    line: u64,
    violations: &mut Vec<Violation>,
) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(fault) => {
            violations.push(Violation {
                kind: fault.kind,
                field,
                line,
                message: fault.message,
            });
            None
        }
    }
}
