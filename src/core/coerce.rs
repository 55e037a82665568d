use crate::core::Cell;

/// Maps one raw cell to a number, or `None` when it cannot be read as one.
///
/// Text cells have every comma removed and surrounding whitespace stripped
/// before parsing, so thousands-grouped values like `"1,234"` are accepted.
/// A parse that yields NaN counts as missing.
#[must_use]
pub fn to_numeric(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Missing => None,
        Cell::Int(value) => Some(*value as f64),
        Cell::Float(value) if value.is_nan() => None,
        Cell::Float(value) => Some(*value),
        Cell::Text(raw) => parse_grouped_number(raw),
    }
}

/// Parses free text that may contain thousands-separator commas.
#[must_use]
pub fn parse_grouped_number(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_nan())
}
