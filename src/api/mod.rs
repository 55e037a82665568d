mod axis_ticks;
mod bar_chart_frame_builder;
mod chart_frame_builder;
mod chart_view;
mod column_selection;
mod dashboard;
mod dashboard_config;
mod dashboard_snapshot;
mod filter_selection;
mod json_contract;
mod line_chart_frame_builder;
mod loader;
pub mod page_text;
mod render_style;
mod table_cache;
mod table_view;

pub use chart_frame_builder::{build_chart_frame, value_axis_title};
pub use chart_view::{
    ChartMode, ChartView, EMPTY_NUMERIC_WARNING, LineChartData, LinePoint, LineSeries,
    StackedBarData, TOTAL_AXIS_LABEL, VALUE_AXIS_LABEL, YEAR_AXIS_LABEL,
};
pub use column_selection::{
    ColumnHints, ColumnSelection, DEFAULT_REGION_COLUMN_HINT, DEFAULT_YEAR_COLUMN_HINT,
};
pub use dashboard::{Dashboard, DashboardView};
pub use dashboard_config::{
    CONFIG_ENV_VAR, DEFAULT_CSV_PATH, DEFAULT_PREVIEW_ROWS, DashboardConfig,
};
pub use dashboard_snapshot::DashboardSnapshot;
pub use filter_selection::{
    DEFAULT_REGION_SELECTION_COUNT, DEFAULT_TRANSPORT_SELECTION_COUNT, FilterSelection,
    MultiSelect, SelectionDefaults,
};
pub use json_contract::{DASHBOARD_SNAPSHOT_JSON_SCHEMA_V1, DashboardSnapshotJsonContractV1};
pub use loader::{LoadStrategy, load_table, load_table_from_bytes};
pub use render_style::{DashPattern, DashboardStyle, SERIES_PALETTE, dash_pattern};
pub use table_cache::{TableCache, TableCacheStats, shared_table_cache};
pub use table_view::{LONG_TABLE_COLUMNS, MISSING_DISPLAY, TableView};
