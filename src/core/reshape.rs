use serde::{Deserialize, Serialize};

use crate::core::{Cell, RawTable, to_numeric};
use crate::error::DashboardResult;

/// Column roles used by [`melt`].
#[derive(Debug, Clone, Copy)]
pub struct MeltColumns<'a> {
    pub year: &'a str,
    pub region: &'a str,
    pub transports: &'a [String],
}

/// Long-form record holding the raw cell, before numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct MeltedRecord {
    pub region: String,
    pub year: String,
    pub transport: String,
    pub value: Cell,
}

/// Long-form record after numeric coercion. `value` is `None` when the raw
/// cell could not be read as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRecord {
    pub region: String,
    pub year: String,
    pub transport: String,
    pub value: Option<f64>,
}

/// Reshapes the wide table into one record per kept row × transport column.
///
/// `keep_row` receives the year and region text forms of each row. Output
/// follows source row order, then the order of `columns.transports`.
pub fn melt(
    table: &RawTable,
    columns: MeltColumns<'_>,
    keep_row: impl Fn(&str, &str) -> bool,
) -> DashboardResult<Vec<MeltedRecord>> {
    let year_index = table.require_column(columns.year)?;
    let region_index = table.require_column(columns.region)?;
    let transport_indices = columns
        .transports
        .iter()
        .map(|name| table.require_column(name).map(|index| (index, name)))
        .collect::<DashboardResult<Vec<_>>>()?;

    let mut records = Vec::with_capacity(table.row_count() * transport_indices.len());
    for row in table.rows() {
        let year = row[year_index].text_form();
        let region = row[region_index].text_form();
        if !keep_row(&year, &region) {
            continue;
        }
        for (index, name) in &transport_indices {
            records.push(MeltedRecord {
                region: region.clone(),
                year: year.clone(),
                transport: (*name).clone(),
                value: row[*index].clone(),
            });
        }
    }

    Ok(records)
}

/// Final long table used by the charts and the long-table display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LongTable {
    records: Vec<LongRecord>,
}

impl LongTable {
    /// Applies [`to_numeric`] to every melted value.
    #[must_use]
    pub fn coerce(melted: Vec<MeltedRecord>) -> Self {
        let records = melted
            .into_iter()
            .map(|record| LongRecord {
                value: to_numeric(&record.value),
                region: record.region,
                year: record.year,
                transport: record.transport,
            })
            .collect();
        Self { records }
    }

    #[must_use]
    pub fn from_records(records: Vec<LongRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[LongRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn present_value_count(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.value.is_some())
            .count()
    }

    /// Records whose transport is in `transports`, in table order.
    #[must_use]
    pub fn with_transports(&self, transports: &[String]) -> Self {
        let records = self
            .records
            .iter()
            .filter(|record| transports.contains(&record.transport))
            .cloned()
            .collect();
        Self { records }
    }
}
