use std::borrow::Cow;
use std::path::Path;

use csv::ReaderBuilder;
use encoding_rs::{EUC_KR, UTF_8};
use indexmap::IndexSet;
use tracing::{debug, info, warn};

use crate::core::{EncodingTag, RawTable, infer_column_kind, parse_cell};
use crate::error::{DashboardError, DashboardResult, LoadError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One decode-then-parse attempt of the loader chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStrategy {
    pub encoding: EncodingTag,
    /// When `false`, quote characters are ordinary field content.
    pub quoting: bool,
}

impl LoadStrategy {
    pub const STRICT: [Self; 5] = [
        Self::strict(EncodingTag::Utf8),
        Self::strict(EncodingTag::Utf8Sig),
        Self::strict(EncodingTag::Cp949),
        Self::strict(EncodingTag::EucKr),
        Self::strict(EncodingTag::Latin1),
    ];

    pub const LENIENT: Self = Self {
        encoding: EncodingTag::Utf8Lenient,
        quoting: false,
    };

    #[must_use]
    pub const fn strict(encoding: EncodingTag) -> Self {
        Self {
            encoding,
            quoting: true,
        }
    }

    /// Decodes without replacement characters; any malformed sequence fails.
    pub fn decode(self, bytes: &[u8]) -> Result<Cow<'_, str>, LoadError> {
        let decoded = match self.encoding {
            EncodingTag::Utf8 => {
                if bytes.starts_with(UTF8_BOM) {
                    None
                } else {
                    UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
                }
            }
            EncodingTag::Utf8Sig | EncodingTag::Utf8Lenient => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            // The WHATWG EUC-KR decoder covers the code page 949 extensions.
            EncodingTag::Cp949 | EncodingTag::EucKr => {
                EUC_KR.decode_without_bom_handling_and_without_replacement(bytes)
            }
            // ISO-8859-1: every byte is the code point of the same value.
            EncodingTag::Latin1 => Some(Cow::Owned(bytes.iter().copied().map(char::from).collect())),
        };

        decoded.ok_or(LoadError::Decode {
            encoding: self.encoding,
        })
    }

    pub fn parse(self, text: &str) -> Result<RawTable, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(self.quoting)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        if headers.is_empty() {
            return Err(LoadError::NoColumns);
        }
        let columns = unique_column_names(headers.iter());
        let width = columns.len();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() > width {
                return Err(LoadError::RaggedRow {
                    line: record.position().map_or(0, |position| position.line()),
                    expected: width,
                    found: record.len(),
                });
            }
            let mut row: Vec<String> = record.iter().map(str::to_owned).collect();
            row.resize(width, String::new());
            raw_rows.push(row);
        }

        let kinds: Vec<_> = (0..width)
            .map(|index| infer_column_kind(raw_rows.iter().map(|row| row[index].as_str())))
            .collect();
        let rows = raw_rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&kinds)
                    .map(|(raw, kind)| parse_cell(raw, *kind))
                    .collect()
            })
            .collect();

        Ok(RawTable::from_validated(columns, rows, self.encoding))
    }

    pub fn load(self, bytes: &[u8]) -> Result<RawTable, LoadError> {
        let text = self.decode(bytes)?;
        self.parse(&text)
    }
}

/// Runs the strict strategies in order, then the lenient fallback.
///
/// Returns the first table that decodes and parses cleanly. When everything
/// fails, the lenient attempt's error is returned.
pub fn load_table_from_bytes(bytes: &[u8]) -> Result<RawTable, LoadError> {
    for strategy in LoadStrategy::STRICT {
        match strategy.load(bytes) {
            Ok(table) => return Ok(table),
            Err(err) => debug!(
                encoding = %strategy.encoding,
                error = %err,
                "load attempt failed"
            ),
        }
    }

    warn!("all strict encodings failed, retrying with lenient quoting");
    LoadStrategy::LENIENT.load(bytes)
}

/// Reads `path` once and decodes it through the strategy chain.
pub fn load_table(path: impl AsRef<Path>) -> DashboardResult<RawTable> {
    let path = path.as_ref();
    let result = std::fs::read(path)
        .map_err(LoadError::from)
        .and_then(|bytes| load_table_from_bytes(&bytes));

    match result {
        Ok(table) => {
            info!(
                path = %path.display(),
                encoding = %table.encoding(),
                rows = table.row_count(),
                columns = table.columns().len(),
                "loaded table"
            );
            Ok(table)
        }
        Err(source) => {
            warn!(path = %path.display(), error = %source, "failed to load table");
            Err(DashboardError::Load {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Blank header cells become `Unnamed: {index}`; repeats get `.1`, `.2`, ...
fn unique_column_names<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: IndexSet<String> = IndexSet::new();
    for (index, header) in headers.enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {index}")
        } else {
            header.to_owned()
        };
        let mut candidate = base.clone();
        let mut suffix = 1usize;
        while taken.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        taken.insert(candidate);
    }
    taken.into_iter().collect()
}
