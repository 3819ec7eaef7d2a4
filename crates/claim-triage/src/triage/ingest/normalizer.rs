use super::super::domain::{MalformedField, UnrecognizedValue};
use tracing::warn;

/// Normalizes a raw cell: trims whitespace and a leading byte-order mark.
pub(crate) fn normalize_cell(raw: &str) -> &str {
    raw.trim_start_matches('\u{feff}').trim()
}

/// Parses an enumerated cell. Empty cells yield `fallback` silently; unrecognized
/// ones yield `fallback` and are recorded in `malformed`.
pub(crate) fn parse_enumerated<T, F>(
    case_id: &str,
    field: &'static str,
    raw: Option<&str>,
    fallback: T,
    parse: F,
    malformed: &mut Vec<MalformedField>,
) -> T
where
    F: FnOnce(&str) -> Result<T, UnrecognizedValue>,
{
    let cell = raw.map(normalize_cell).unwrap_or_default();
    if cell.is_empty() {
        return fallback;
    }

    match parse(cell) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                case_id,
                field,
                raw = %err.raw,
                "unrecognized value; scoring with fallback weight"
            );
            malformed.push(MalformedField {
                field,
                raw: err.raw,
            });
            fallback
        }
    }
}
