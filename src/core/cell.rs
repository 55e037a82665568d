use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens read as a missing cell.
pub const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Text form of a missing cell.
pub const MISSING_TEXT: &str = "nan";

/// One raw table cell after per-column type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// String representation used for year/region domains and long records.
    #[must_use]
    pub fn text_form(&self) -> String {
        match self {
            Self::Missing => MISSING_TEXT.to_owned(),
            Self::Int(value) => value.to_string(),
            Self::Float(value) => format_float(*value),
            Self::Text(value) => value.clone(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text_form())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Float(value)
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Inferred storage kind of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Int,
    Float,
    Text,
}

#[derive(Debug, Clone, Copy)]
enum Token {
    Missing,
    Int(i64),
    Float(f64),
    Text,
}

fn classify(raw: &str) -> Token {
    if MISSING_TOKENS.contains(&raw) {
        return Token::Missing;
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Token::Int(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_nan() => Token::Missing,
        Ok(value) => Token::Float(value),
        Err(_) => Token::Text,
    }
}

/// Infers the kind of a column from its raw field strings.
#[must_use]
pub fn infer_column_kind<'a>(fields: impl IntoIterator<Item = &'a str>) -> ColumnKind {
    let mut saw_missing = false;
    let mut saw_float = false;
    for raw in fields {
        match classify(raw) {
            Token::Missing => saw_missing = true,
            Token::Int(_) => {}
            Token::Float(_) => saw_float = true,
            Token::Text => return ColumnKind::Text,
        }
    }

    if saw_missing || saw_float {
        ColumnKind::Float
    } else {
        ColumnKind::Int
    }
}

/// Converts one raw field into a cell of the given column kind.
#[must_use]
pub fn parse_cell(raw: &str, kind: ColumnKind) -> Cell {
    match (classify(raw), kind) {
        (Token::Missing, _) => Cell::Missing,
        (_, ColumnKind::Text) => Cell::Text(raw.to_owned()),
        (Token::Int(value), ColumnKind::Int) => Cell::Int(value),
        (Token::Int(value), ColumnKind::Float) => Cell::Float(value as f64),
        (Token::Float(value), _) => Cell::Float(value),
        (Token::Text, _) => Cell::Text(raw.to_owned()),
    }
}

/// Formats a float as its shortest round-trip text.
///
/// Integral values keep a trailing `.0`; magnitudes outside `[1e-4, 1e16)`
/// switch to exponent notation with a signed two-digit exponent (`1e+16`).
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return MISSING_TEXT.to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let rendered = format!("{value:e}");
        let Some((mantissa, exponent)) = rendered.split_once('e') else {
            return rendered;
        };
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(digits) => ('-', digits),
            None => ('+', exponent),
        };
        return format!("{mantissa}e{sign}{digits:0>2}");
    }

    let rendered = value.to_string();
    if rendered.contains('.') {
        rendered
    } else {
        format!("{rendered}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::{Cell, ColumnKind, format_float, infer_column_kind, parse_cell};

    #[test]
    fn integer_column_with_gap_becomes_float() {
        let kind = infer_column_kind(["2018", "", "2020"]);
        assert_eq!(kind, ColumnKind::Float);
        assert_eq!(parse_cell("2018", kind), Cell::Float(2018.0));
        assert_eq!(parse_cell("", kind), Cell::Missing);
    }

    #[test]
    fn comma_grouped_numbers_keep_column_textual() {
        let kind = infer_column_kind(["300000", "310,000"]);
        assert_eq!(kind, ColumnKind::Text);
        assert_eq!(parse_cell("300000", kind), Cell::Text("300000".to_owned()));
        assert_eq!(parse_cell("NA", kind), Cell::Missing);
    }

    #[test]
    fn float_text_form_matches_shortest_repr() {
        assert_eq!(format_float(2018.0), "2018.0");
        assert_eq!(format_float(12.5), "12.5");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(-0.5), "-0.5");
        assert_eq!(Cell::Missing.text_form(), "nan");
        assert_eq!(Cell::Int(2019).text_form(), "2019");
    }
}
