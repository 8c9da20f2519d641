//! Pure field rules for the three mandatory columns.
//!
//! Each rule takes the raw bytes of one cell and either parses the value or
//! reports a tagged fault. Rules never see the rest of the row.

use url::Url;

use crate::validate::violation::ViolationKind;

/// A rule failure before it is attached to a field and line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldFault {
    pub kind: ViolationKind,
    pub message: &'static str,
}

impl FieldFault {
    const fn new(kind: ViolationKind, message: &'static str) -> Self {
        Self { kind, message }
    }
}

/// True when the cell is empty or all ASCII whitespace.
pub fn is_blank(field: &[u8]) -> bool {
    field.iter().all(u8::is_ascii_whitespace)
}

/// Name rule: present, non-blank, valid UTF-8. Stored as-is, untrimmed.
pub fn parse_name(raw: Option<&[u8]>) -> Result<String, FieldFault> {
    let raw = raw.unwrap_or_default();
    if is_blank(raw) {
        return Err(FieldFault::new(
            ViolationKind::MissingField,
            "hotel name is missing or blank",
        ));
    }
    match std::str::from_utf8(raw) {
        Ok(text) => Ok(text.to_string()),
        Err(_) => Err(FieldFault::new(
            ViolationKind::EncodingError,
            "hotel name is not valid UTF-8",
        )),
    }
}

/// URI rule: present, non-blank, and an absolute URL with a scheme and a
/// host. The stored text is the cell verbatim, so the cell itself must be
/// the valid URL; any whitespace in it is malformed.
pub fn parse_uri(raw: Option<&[u8]>) -> Result<String, FieldFault> {
    let raw = raw.unwrap_or_default();
    if is_blank(raw) {
        return Err(FieldFault::new(
            ViolationKind::MissingField,
            "hotel URL is missing or blank",
        ));
    }
    let malformed = FieldFault::new(
        ViolationKind::FormatError,
        "hotel URL is not a well-formed URL",
    );
    let text = std::str::from_utf8(raw).map_err(|_| malformed)?;
    // Url::parse forgives outer padding and embedded tabs; a cell that
    // needs that forgiveness is not a valid URL as stored.
    if text.contains(char::is_whitespace) {
        return Err(malformed);
    }
    let parsed = Url::parse(text).map_err(|_| malformed)?;
    if !parsed.has_host() {
        return Err(malformed);
    }
    Ok(text.to_string())
}

/// Star rule: a decimal number within 0 to 5 inclusive. The range check
/// rejects NaN and the infinities for free.
pub fn parse_stars(raw: Option<&[u8]>) -> Result<f64, FieldFault> {
    let raw = raw.unwrap_or_default();
    if is_blank(raw) {
        return Err(FieldFault::new(
            ViolationKind::MissingField,
            "hotel star rating is missing or blank",
        ));
    }
    std::str::from_utf8(raw)
        .ok()
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|stars| (0.0..=5.0).contains(stars))
        .ok_or_else(|| {
            FieldFault::new(
                ViolationKind::RangeError,
                "hotel star rating is not a number between 0 and 5",
            )
        })
}
