use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::NamedTempFile;
use transit_viz::DashboardError;
use transit_viz::api::{
    ChartMode, ColumnHints, DEFAULT_CSV_PATH, Dashboard, DashboardConfig, load_table_from_bytes,
};
use transit_viz::core::Viewport;
use transit_viz::render::NullRenderer;

#[test]
fn empty_json_takes_every_default() {
    let config = DashboardConfig::from_json_str("{}").expect("defaults");

    assert_eq!(config, DashboardConfig::default());
    assert_eq!(config.csv_path, PathBuf::from(DEFAULT_CSV_PATH));
    assert_eq!(config.preview_rows, 10);
    assert_eq!(config.default_region_count, 6);
    assert_eq!(config.default_transport_count, 3);
    assert_eq!(config.year_column_hint, "년(Annual)");
    assert_eq!(config.region_column_hint, "구분");
    assert_eq!(config.initial_chart_mode, ChartMode::Line);
}

#[test]
fn config_json_roundtrip() {
    let config = DashboardConfig::new("/tmp/transit.csv")
        .with_viewport(Viewport::new(1024, 600))
        .with_initial_chart_mode(ChartMode::StackedBar);

    let json = config.to_json_pretty().expect("config should serialize");
    let restored = DashboardConfig::from_json_str(&json).expect("config should deserialize");
    assert_eq!(restored, config);
}

#[test]
fn zero_preview_rows_and_empty_viewport_are_rejected() {
    let err = DashboardConfig::from_json_str(r#"{"preview_rows": 0}"#)
        .expect_err("zero preview rows must fail");
    assert!(matches!(err, DashboardError::Config(_)));

    let err = DashboardConfig::from_json_str(r#"{"viewport": {"width": 0, "height": 480}}"#)
        .expect_err("empty viewport must fail");
    assert!(matches!(err, DashboardError::InvalidViewport { .. }));
}

#[test]
fn malformed_json_is_a_config_error() {
    let err = DashboardConfig::from_json_str("{").expect_err("malformed json must fail");
    assert!(matches!(err, DashboardError::Config(_)));
}

#[test]
fn config_loads_from_a_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(br#"{"csv_path": "data.csv", "default_region_count": 2}"#)
        .expect("write config");
    file.flush().expect("flush config");

    let config = DashboardConfig::load_from_path(file.path()).expect("config file");
    assert_eq!(config.csv_path, PathBuf::from("data.csv"));
    assert_eq!(config.selection_defaults().regions, 2);
    assert_eq!(config.selection_defaults().transports, 3);
}

#[test]
fn column_hints_pick_the_initial_year_and_region_columns() {
    let table = load_table_from_bytes("구분,연도,버스\n서울,2018,1\n".as_bytes()).expect("csv");
    let config = DashboardConfig::new("inline.csv").with_column_hints(ColumnHints {
        year: "연도".to_owned(),
        region: "구분".to_owned(),
    });
    assert_eq!(config.column_hints().year, "연도");

    let dashboard = Dashboard::from_table(NullRenderer::default(), config, Arc::new(table))
        .expect("dashboard init");
    assert_eq!(dashboard.columns().year_column(), "연도");
    assert_eq!(dashboard.columns().region_column(), "구분");
    assert_eq!(dashboard.columns().transport_candidates(), vec!["버스"]);
}
