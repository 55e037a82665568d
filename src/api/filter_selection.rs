use indexmap::IndexSet;
use tracing::trace;

use crate::core::RawTable;
use crate::error::{DashboardError, DashboardResult};

pub const DEFAULT_REGION_SELECTION_COUNT: usize = 6;
pub const DEFAULT_TRANSPORT_SELECTION_COUNT: usize = 3;

/// How many leading options are selected by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionDefaults {
    pub regions: usize,
    pub transports: usize,
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            regions: DEFAULT_REGION_SELECTION_COUNT,
            transports: DEFAULT_TRANSPORT_SELECTION_COUNT,
        }
    }
}

/// Multi-select widget state: ordered options plus the selected subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSelect {
    kind: &'static str,
    options: IndexSet<String>,
    selected: IndexSet<String>,
}

impl MultiSelect {
    fn with_leading(kind: &'static str, options: IndexSet<String>, count: usize) -> Self {
        let selected = options.iter().take(count).cloned().collect();
        Self {
            kind,
            options,
            selected,
        }
    }

    #[must_use]
    pub fn options(&self) -> &IndexSet<String> {
        &self.options
    }

    /// Selected values in option order.
    #[must_use]
    pub fn selected(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| self.selected.contains(*option))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.contains(value)
    }

    /// Replaces the selection. Every value must be one of the options.
    pub fn set_selected<I, S>(&mut self, values: I) -> DashboardResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selected = IndexSet::new();
        for value in values {
            selected.insert(self.require_option(value.as_ref())?);
        }
        self.selected = selected;
        Ok(())
    }

    /// Adds or removes one option.
    pub fn toggle(&mut self, value: &str, selected: bool) -> DashboardResult<()> {
        let value = self.require_option(value)?;
        if selected {
            self.selected.insert(value);
        } else {
            self.selected.shift_remove(&value);
        }
        Ok(())
    }

    fn require_option(&self, value: &str) -> DashboardResult<String> {
        if self.options.contains(value) {
            Ok(value.to_owned())
        } else {
            Err(DashboardError::UnknownOption {
                kind: self.kind,
                value: value.to_owned(),
            })
        }
    }
}

/// Year, region, and transport filters for one year/region column choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub years: MultiSelect,
    pub regions: MultiSelect,
    pub transports: MultiSelect,
}

impl FilterSelection {
    /// Builds the domains from the table and applies the default selections:
    /// every year, the leading regions, and the leading transports.
    pub fn with_defaults(
        table: &RawTable,
        year_column: &str,
        region_column: &str,
        transport_candidates: &[String],
        defaults: SelectionDefaults,
    ) -> DashboardResult<Self> {
        let years = table.distinct_text(year_column)?;
        let regions = table.distinct_text(region_column)?;
        let transports: IndexSet<String> = transport_candidates.iter().cloned().collect();
        trace!(
            years = years.len(),
            regions = regions.len(),
            transports = transports.len(),
            "rebuilt filter domains"
        );

        let year_count = years.len();
        Ok(Self {
            years: MultiSelect::with_leading("year", years, year_count),
            regions: MultiSelect::with_leading("region", regions, defaults.regions),
            transports: MultiSelect::with_leading("transport", transports, defaults.transports),
        })
    }

    /// Row predicate over year and region text forms.
    #[must_use]
    pub fn keeps_row(&self, year: &str, region: &str) -> bool {
        self.years.is_selected(year) && self.regions.is_selected(region)
    }
}
