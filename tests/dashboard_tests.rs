use std::io::Write;
use std::sync::Arc;

use approx::assert_relative_eq;
use tempfile::NamedTempFile;
use transit_viz::api::{
    ChartMode, ChartView, Dashboard, DashboardConfig, DashboardSnapshot, TableCache,
    load_table_from_bytes,
};
use transit_viz::core::{EncodingTag, Viewport};
use transit_viz::render::NullRenderer;
use transit_viz::DashboardError;

const SEOUL_CSV: &str = "년(Annual),구분,버스,지하철\n2018,서울,\"120,000\",300000\n2019,서울,130000,\"310,000\"\n";

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

fn dashboard_from(contents: &str) -> Dashboard<NullRenderer> {
    let table = load_table_from_bytes(contents.as_bytes()).expect("csv should load");
    Dashboard::from_table(
        NullRenderer::default(),
        DashboardConfig::new("inline.csv"),
        Arc::new(table),
    )
    .expect("dashboard init")
}

#[test]
fn seoul_scenario_sums_both_transports_per_year() {
    let file = csv_file(SEOUL_CSV);
    let cache = TableCache::new();
    let mut dashboard = Dashboard::open_with_cache(
        NullRenderer::default(),
        DashboardConfig::new(file.path()),
        &cache,
    )
    .expect("dashboard should open");

    assert_eq!(dashboard.encoding(), EncodingTag::Utf8);
    dashboard
        .set_selected_transports(["버스", "지하철"])
        .expect("known transports");
    dashboard
        .set_selected_years(["2018", "2019"])
        .expect("known years");
    dashboard
        .set_selected_regions(["서울"])
        .expect("known region");

    let long_table = dashboard.long_table().expect("long table");
    assert_eq!(long_table.len(), 4);
    let values: Vec<Option<f64>> = long_table.records().iter().map(|r| r.value).collect();
    assert_eq!(
        values,
        vec![Some(120_000.0), Some(300_000.0), Some(130_000.0), Some(310_000.0)]
    );

    dashboard.set_chart_mode(ChartMode::BarSum);
    let view = dashboard.view().expect("view");
    let ChartView::BarSum(totals) = view.chart else {
        panic!("expected bar-sum view");
    };
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].year, "2018");
    assert_relative_eq!(totals[0].total, 420_000.0);
    assert_eq!(totals[1].year, "2019");
    assert_relative_eq!(totals[1].total, 440_000.0);
}

#[test]
fn two_column_file_halts_without_chart_or_table() {
    let dashboard = dashboard_from("연도,시도\n2018,서울\n");

    assert_eq!(dashboard.raw_preview().row_count(), 1);
    let err = dashboard.view().expect_err("no transport columns");
    assert!(matches!(err, DashboardError::NoTransportColumns));
    assert!(err.is_halting());
    assert!(dashboard.chart_frame().is_err());
}

#[test]
fn missing_file_fails_to_open() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = DashboardConfig::new(dir.path().join("absent.csv"));

    let err = Dashboard::open_with_cache(NullRenderer::default(), config, &TableCache::new())
        .err()
        .expect("open must fail");
    assert!(matches!(err, DashboardError::Load { .. }));
}

#[test]
fn raw_preview_shows_ten_rows_and_long_table_ignores_transport_selection() {
    let mut csv = String::from("년(Annual),구분,버스,지하철,택시,도보\n");
    for year in 2011..2025 {
        csv.push_str(&format!("{year},서울,1,2,3,4\n"));
    }
    let mut dashboard = dashboard_from(&csv);

    let preview = dashboard.raw_preview();
    assert_eq!(preview.row_count(), 10);
    assert_eq!(preview.index, (0..10).collect::<Vec<_>>());

    dashboard
        .set_selected_transports(["버스"])
        .expect("known transport");
    let view = dashboard.view().expect("view");
    // 14 years x 4 candidate columns, regardless of the transport selection.
    assert_eq!(view.long_table.len(), 14 * 4);
    assert_eq!(view.long_table_view().index.last().copied(), Some(14 * 4 - 1));
}

#[test]
fn changing_a_column_resets_every_filter() {
    let mut dashboard = dashboard_from(SEOUL_CSV);
    dashboard.set_selected_years(["2018"]).expect("known year");
    dashboard.set_selected_transports(["지하철"]).expect("known transport");

    dashboard.set_year_column("버스").expect("known column");
    let filters = dashboard.filters();
    assert_eq!(filters.years.selected(), vec!["120,000", "130000"]);
    assert_eq!(filters.transports.selected(), vec!["년(Annual)", "지하철"]);
}

#[test]
fn render_reports_whether_a_frame_was_drawn() {
    let mut dashboard = dashboard_from(SEOUL_CSV);
    dashboard
        .set_viewport(Viewport::new(900, 480))
        .expect("valid viewport");

    assert!(dashboard.render().expect("line chart renders"));
    assert_eq!(dashboard.renderer().frames_rendered, 1);
    assert!(dashboard.renderer().last_line_count > 0);
    assert!(dashboard.renderer().last_rect_count > 0);

    dashboard.set_selected_transports(Vec::<String>::new()).expect("empty selection");
    assert!(!dashboard.render().expect("warning draws nothing"));
    assert_eq!(dashboard.renderer().frames_rendered, 1);

    dashboard.set_chart_mode(ChartMode::StackedBar);
    dashboard.set_selected_transports(["버스"]).expect("known transport");
    assert!(dashboard.render().expect("stacked chart renders"));
    assert_eq!(dashboard.renderer().frames_rendered, 2);
}

#[test]
fn invalid_viewport_is_rejected() {
    let mut dashboard = dashboard_from(SEOUL_CSV);
    let err = dashboard
        .set_viewport(Viewport::new(0, 300))
        .expect_err("zero width must fail");
    assert!(matches!(err, DashboardError::InvalidViewport { width: 0, .. }));
}

#[test]
fn snapshot_json_restores_widget_state() {
    let mut source = dashboard_from(SEOUL_CSV);
    source.set_selected_years(["2019"]).expect("known year");
    source.set_chart_mode(ChartMode::StackedBar);

    let json = source
        .snapshot_json_contract_v1_pretty()
        .expect("snapshot should serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let mut restored = dashboard_from(SEOUL_CSV);
    restored.apply_snapshot_json(&json).expect("snapshot applies");
    assert_eq!(restored.snapshot(), source.snapshot());
    assert_eq!(restored.chart_mode(), ChartMode::StackedBar);
}

#[test]
fn snapshot_with_unknown_option_changes_nothing() {
    let mut dashboard = dashboard_from(SEOUL_CSV);
    let before = dashboard.snapshot();

    let mut snapshot = before.clone();
    snapshot.chart_mode = ChartMode::BarSum;
    snapshot.selected_regions = vec!["제주".to_owned()];
    let err = dashboard
        .apply_snapshot(&snapshot)
        .expect_err("unknown region must be rejected");
    assert!(matches!(err, DashboardError::UnknownOption { kind: "region", .. }));
    assert_eq!(dashboard.snapshot(), before);
}

#[test]
fn bare_snapshot_json_is_accepted() {
    let dashboard = dashboard_from(SEOUL_CSV);
    let json = serde_json::to_string(&dashboard.snapshot()).expect("serialize snapshot");

    let decoded = DashboardSnapshot::from_json_compat_str(&json).expect("bare snapshot");
    assert_eq!(decoded, dashboard.snapshot());

    let future = r#"{"schema_version": 2, "snapshot": {}}"#;
    assert!(DashboardSnapshot::from_json_compat_str(future).is_err());
}

#[test]
fn infinite_cell_is_a_gap_and_the_chart_still_draws() {
    let mut dashboard =
        dashboard_from("년(Annual),구분,버스,지하철\n2018,서울,100,inf\n2019,서울,200,300\n");
    dashboard
        .set_selected_transports(["버스", "지하철"])
        .expect("known transports");

    let frame = dashboard
        .chart_frame()
        .expect("line frame")
        .expect("line view draws");
    frame.validate().expect("frame is drawable");
    // 버스 has two markers; 지하철 only the finite 2019 value.
    let markers = frame
        .rects
        .iter()
        .filter(|rect| rect.corner_radius > 0.0)
        .count();
    assert_eq!(markers, 3);
    assert!(dashboard.render().expect("line chart renders"));

    dashboard.set_chart_mode(ChartMode::StackedBar);
    assert!(dashboard.render().expect("stacked chart renders"));
}

#[test]
fn overflowing_year_total_skips_only_that_bar() {
    let mut dashboard =
        dashboard_from("년(Annual),구분,버스,지하철\n2018,서울,1e308,1e308\n2019,서울,1,2\n");
    dashboard
        .set_selected_transports(["버스", "지하철"])
        .expect("known transports");
    dashboard.set_chart_mode(ChartMode::BarSum);

    let frame = dashboard
        .chart_frame()
        .expect("bar frame")
        .expect("bar view draws");
    frame.validate().expect("frame is drawable");
    assert_eq!(frame.rects.len(), 1);
    assert!(dashboard.render().expect("bar chart renders"));

    dashboard.set_chart_mode(ChartMode::StackedBar);
    let frame = dashboard
        .chart_frame()
        .expect("stacked frame")
        .expect("stacked view draws");
    frame.validate().expect("frame is drawable");
}
