use std::fmt;

use serde::{Deserialize, Serialize};

/// Character encoding (and parse mode) that produced a loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncodingTag {
    Utf8,
    Utf8Sig,
    Cp949,
    EucKr,
    Latin1,
    /// Strict UTF-8 with quote characters read literally.
    Utf8Lenient,
}

impl EncodingTag {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Sig => "utf-8-sig",
            Self::Cp949 => "cp949",
            Self::EucKr => "euc-kr",
            Self::Latin1 => "latin1",
            Self::Utf8Lenient => "utf-8 (lenient quoting)",
        }
    }

    #[must_use]
    pub fn is_lenient(self) -> bool {
        matches!(self, Self::Utf8Lenient)
    }
}

impl fmt::Display for EncodingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
