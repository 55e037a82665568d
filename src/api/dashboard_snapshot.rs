use serde::{Deserialize, Serialize};

use crate::core::EncodingTag;

use super::ChartMode;

/// Serializable widget state of one dashboard session.
///
/// Selections are listed in option order. `encoding` is informational and
/// is not restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub encoding: EncodingTag,
    pub year_column: String,
    pub region_column: String,
    pub selected_years: Vec<String>,
    pub selected_regions: Vec<String>,
    pub selected_transports: Vec<String>,
    #[serde(default)]
    pub chart_mode: ChartMode,
}
