use serde::{Deserialize, Serialize};

use crate::core::{Cell, LongTable, RawTable, format_float};

/// Display string of a missing cell.
pub const MISSING_DISPLAY: &str = "None";

pub const LONG_TABLE_COLUMNS: [&str; 4] = ["region", "year", "transport", "value"];

/// Read-only grid of display strings: header, row labels, and cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<String>,
    /// Row labels; positions in the source table.
    pub index: Vec<usize>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// First `count` rows of the raw table, unmodified.
    #[must_use]
    pub fn raw_preview(table: &RawTable, count: usize) -> Self {
        let mut index = Vec::with_capacity(count.min(table.row_count()));
        let mut rows = Vec::with_capacity(index.capacity());
        for (position, row) in table.head(count) {
            index.push(position);
            rows.push(row.iter().map(display_cell).collect());
        }

        Self {
            columns: table.columns().to_vec(),
            index,
            rows,
        }
    }

    /// Every long record, labelled `0..n`.
    #[must_use]
    pub fn long_table(table: &LongTable) -> Self {
        let rows = table
            .records()
            .iter()
            .map(|record| {
                vec![
                    record.region.clone(),
                    record.year.clone(),
                    record.transport.clone(),
                    record
                        .value
                        .map_or_else(|| MISSING_DISPLAY.to_owned(), format_float),
                ]
            })
            .collect();

        Self {
            columns: LONG_TABLE_COLUMNS.iter().map(|name| (*name).to_owned()).collect(),
            index: (0..table.len()).collect(),
            rows,
        }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn display_cell(cell: &Cell) -> String {
    match cell {
        Cell::Missing => MISSING_DISPLAY.to_owned(),
        other => other.text_form(),
    }
}
