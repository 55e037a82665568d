use indexmap::IndexSet;

use crate::core::{Cell, EncodingTag};
use crate::error::{DashboardError, DashboardResult};

/// Rows × columns exactly as read from the CSV file.
///
/// Column names are unique (duplicates get a `.N` suffix at load time) and
/// every row holds one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
    encoding: EncodingTag,
}

impl RawTable {
    pub fn new(
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
        encoding: EncodingTag,
    ) -> DashboardResult<Self> {
        if columns.is_empty() {
            return Err(DashboardError::InvalidData(
                "table must have at least one column".to_owned(),
            ));
        }
        let mut seen = IndexSet::with_capacity(columns.len());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(DashboardError::InvalidData(format!(
                    "duplicate column name `{name}`"
                )));
            }
        }
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DashboardError::InvalidData(format!(
                "row {index} has {} cells, expected {}",
                row.len(),
                columns.len()
            )));
        }

        Ok(Self {
            columns,
            rows,
            encoding,
        })
    }

    /// Builds a table whose columns are already unique and whose rows already
    /// match the header width (the loader guarantees both).
    pub(crate) fn from_validated(
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
        encoding: EncodingTag,
    ) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == columns.len()));
        Self {
            columns,
            rows,
            encoding,
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn encoding(&self) -> EncodingTag {
        self.encoding
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn require_column(&self, name: &str) -> DashboardResult<usize> {
        self.column_index(name)
            .ok_or_else(|| DashboardError::UnknownColumn(name.to_owned()))
    }

    /// First `count` rows, paired with their source positions.
    pub fn head(&self, count: usize) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows
            .iter()
            .take(count)
            .enumerate()
            .map(|(index, row)| (index, row.as_slice()))
    }

    /// Distinct text forms of one column in first-occurrence order.
    pub fn distinct_text(&self, column: &str) -> DashboardResult<IndexSet<String>> {
        let index = self.require_column(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row[index].text_form())
            .collect())
    }
}
