use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::{
    LongTable, StackedSegment, YearTotal, sum_by_year, sum_by_year_and_transport,
};

pub const YEAR_AXIS_LABEL: &str = "연도";
pub const VALUE_AXIS_LABEL: &str = "값";
pub const TOTAL_AXIS_LABEL: &str = "합계";
pub const EMPTY_NUMERIC_WARNING: &str =
    "수치 데이터로 변환 가능한 값이 없습니다. 원시값을 확인해 주세요.";

/// Chart type chosen by the mode radio control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartMode {
    #[default]
    Line,
    BarSum,
    StackedBar,
}

impl ChartMode {
    pub const ALL: [Self; 3] = [Self::Line, Self::BarSum, Self::StackedBar];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Line => "라인 차트 (연도별)",
            Self::BarSum => "막대 차트 (연도별 합계)",
            Self::StackedBar => "스택형 막대(연도별)",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.label() == label)
    }

    #[must_use]
    pub fn value_axis_label(self) -> &'static str {
        match self {
            Self::BarSum => TOTAL_AXIS_LABEL,
            Self::Line | Self::StackedBar => VALUE_AXIS_LABEL,
        }
    }
}

/// One sample of a line series; `category` indexes `LineChartData::years`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub category: usize,
    pub value: Option<f64>,
}

/// Line for one (region, transport) pair. Missing values break the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    pub region: String,
    pub transport: String,
    /// Color slot, shared by every series of the same region.
    pub region_index: usize,
    /// Dash slot, shared by every series of the same transport.
    pub transport_index: usize,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChartData {
    /// Categorical x axis in first-appearance order.
    pub years: Vec<String>,
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackedBarData {
    /// Sorted years (x axis).
    pub years: Vec<String>,
    /// Stack order; also the color slot order.
    pub transports: Vec<String>,
    pub segments: Vec<StackedSegment>,
}

/// Chart content for the current mode, before any pixel layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartView {
    Line(LineChartData),
    BarSum(Vec<YearTotal>),
    StackedBar(StackedBarData),
    /// Nothing is drawn; the message is shown instead.
    Warning(String),
}

impl ChartView {
    /// Builds the view for `mode` from the records of the selected transports.
    #[must_use]
    pub fn build(long_table: &LongTable, selected_transports: &[String], mode: ChartMode) -> Self {
        let charted = long_table.with_transports(selected_transports);
        trace!(
            mode = ?mode,
            records = charted.len(),
            present = charted.present_value_count(),
            "building chart view"
        );

        match mode {
            ChartMode::Line => {
                if charted.present_value_count() == 0 {
                    warn!("no numeric values to plot in line mode");
                    return Self::Warning(EMPTY_NUMERIC_WARNING.to_owned());
                }
                Self::Line(line_chart_data(&charted))
            }
            ChartMode::BarSum => Self::BarSum(sum_by_year(&charted)),
            ChartMode::StackedBar => Self::StackedBar(stacked_bar_data(&charted)),
        }
    }

    #[must_use]
    pub fn warning(&self) -> Option<&str> {
        match self {
            Self::Warning(message) => Some(message),
            _ => None,
        }
    }
}

fn line_chart_data(table: &LongTable) -> LineChartData {
    let mut years: IndexSet<&str> = IndexSet::new();
    let mut regions: IndexSet<&str> = IndexSet::new();
    let mut transports: IndexSet<&str> = IndexSet::new();
    let mut series: IndexMap<(&str, &str), Vec<LinePoint>> = IndexMap::new();

    for record in table.records() {
        let (category, _) = years.insert_full(record.year.as_str());
        regions.insert(record.region.as_str());
        transports.insert(record.transport.as_str());
        series
            .entry((record.region.as_str(), record.transport.as_str()))
            .or_default()
            .push(LinePoint {
                category,
                value: record.value,
            });
    }

    let series = series
        .into_iter()
        .map(|((region, transport), points)| LineSeries {
            region: region.to_owned(),
            transport: transport.to_owned(),
            region_index: regions.get_index_of(region).unwrap_or_default(),
            transport_index: transports.get_index_of(transport).unwrap_or_default(),
            points,
        })
        .collect();

    LineChartData {
        years: years.into_iter().map(str::to_owned).collect(),
        series,
    }
}

fn stacked_bar_data(table: &LongTable) -> StackedBarData {
    let segments = sum_by_year_and_transport(table);
    let years: Vec<String> = segments
        .iter()
        .map(|segment| segment.year.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let transports: Vec<String> = segments
        .iter()
        .map(|segment| segment.transport.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect();

    StackedBarData {
        years,
        transports,
        segments,
    }
}
