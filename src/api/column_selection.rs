use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DashboardError, DashboardResult};

pub const DEFAULT_YEAR_COLUMN_HINT: &str = "년(Annual)";
pub const DEFAULT_REGION_COLUMN_HINT: &str = "구분";

/// Column names preferred as the default year/region choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnHints {
    pub year: String,
    pub region: String,
}

impl Default for ColumnHints {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR_COLUMN_HINT.to_owned(),
            region: DEFAULT_REGION_COLUMN_HINT.to_owned(),
        }
    }
}

/// Which columns play the year and region roles. Everything else is a
/// transport candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSelection {
    columns: Vec<String>,
    year: String,
    region: String,
}

impl ColumnSelection {
    /// Pre-selects the hinted columns, falling back to the first and second
    /// columns (the first again for a single-column table).
    pub fn guess(columns: &[String], hints: &ColumnHints) -> DashboardResult<Self> {
        let Some(first) = columns.first() else {
            return Err(DashboardError::InvalidData(
                "cannot choose columns of a table without columns".to_owned(),
            ));
        };

        let year = if columns.contains(&hints.year) {
            hints.year.clone()
        } else {
            first.clone()
        };
        let region = if columns.contains(&hints.region) {
            hints.region.clone()
        } else {
            columns.get(1).unwrap_or(first).clone()
        };
        debug!(year = %year, region = %region, "guessed year/region columns");

        Ok(Self {
            columns: columns.to_vec(),
            year,
            region,
        })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn year_column(&self) -> &str {
        &self.year
    }

    #[must_use]
    pub fn region_column(&self) -> &str {
        &self.region
    }

    /// Returns `true` when the choice changed.
    pub fn set_year_column(&mut self, name: &str) -> DashboardResult<bool> {
        let name = self.require_known(name)?;
        let changed = self.year != name;
        self.year = name;
        Ok(changed)
    }

    /// Returns `true` when the choice changed.
    pub fn set_region_column(&mut self, name: &str) -> DashboardResult<bool> {
        let name = self.require_known(name)?;
        let changed = self.region != name;
        self.region = name;
        Ok(changed)
    }

    /// All columns except the current year and region columns, in column order.
    #[must_use]
    pub fn transport_candidates(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|column| **column != self.year && **column != self.region)
            .cloned()
            .collect()
    }

    /// Same as [`Self::transport_candidates`], failing when none remain.
    pub fn require_transport_candidates(&self) -> DashboardResult<Vec<String>> {
        let candidates = self.transport_candidates();
        if candidates.is_empty() {
            warn!(
                year = %self.year,
                region = %self.region,
                "no transport columns left"
            );
            return Err(DashboardError::NoTransportColumns);
        }
        Ok(candidates)
    }

    fn require_known(&self, name: &str) -> DashboardResult<String> {
        self.columns
            .iter()
            .find(|column| *column == name)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownColumn(name.to_owned()))
    }
}
