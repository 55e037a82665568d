use std::path::PathBuf;

use thiserror::Error;

use crate::core::EncodingTag;

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Failure of one CSV load attempt (or of the whole strategy chain).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not valid {encoding}")]
    Decode { encoding: EncodingTag },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("no columns to parse from file")]
    NoColumns,

    #[error("expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to load `{path}`: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("no transport columns remain after choosing the year and region columns")]
    NoTransportColumns,

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown {kind} option: {value}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    Config(String),
}

impl DashboardError {
    /// Returns `true` for the two conditions that stop the page from rendering.
    #[must_use]
    pub fn is_halting(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::NoTransportColumns)
    }
}
