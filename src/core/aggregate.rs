use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::LongTable;

/// Sum of present values for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTotal {
    pub year: String,
    pub total: f64,
}

/// Sum of present values for one (year, transport) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedSegment {
    pub year: String,
    pub transport: String,
    pub total: f64,
}

/// Groups records by year and sums the present values.
///
/// Missing values are skipped, so a group with only missing values sums to
/// zero. Groups come out sorted by year text.
#[must_use]
pub fn sum_by_year(table: &LongTable) -> Vec<YearTotal> {
    let mut groups: BTreeMap<&str, f64> = BTreeMap::new();
    for record in table.records() {
        let total = groups.entry(record.year.as_str()).or_insert(0.0);
        if let Some(value) = record.value {
            *total += value;
        }
    }

    groups
        .into_iter()
        .map(|(year, total)| YearTotal {
            year: year.to_owned(),
            total,
        })
        .collect()
}

/// Groups records by (year, transport) and sums the present values.
///
/// Same missing-value rule as [`sum_by_year`]; groups are sorted by year,
/// then transport.
#[must_use]
pub fn sum_by_year_and_transport(table: &LongTable) -> Vec<StackedSegment> {
    let mut groups: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for record in table.records() {
        let total = groups
            .entry((record.year.as_str(), record.transport.as_str()))
            .or_insert(0.0);
        if let Some(value) = record.value {
            *total += value;
        }
    }

    groups
        .into_iter()
        .map(|((year, transport), total)| StackedSegment {
            year: year.to_owned(),
            transport: transport.to_owned(),
            total,
        })
        .collect()
}
