use transit_viz::api::{
    ChartMode, ChartView, DashboardStyle, TOTAL_AXIS_LABEL, VALUE_AXIS_LABEL, YEAR_AXIS_LABEL,
    build_chart_frame, value_axis_title,
};
use transit_viz::core::{LongRecord, LongTable, Viewport};
use transit_viz::render::{NullRenderer, Renderer};

fn record(region: &str, year: &str, transport: &str, value: Option<f64>) -> LongRecord {
    LongRecord {
        region: region.to_owned(),
        year: year.to_owned(),
        transport: transport.to_owned(),
        value,
    }
}

fn selected() -> Vec<String> {
    vec!["버스".to_owned(), "지하철".to_owned()]
}

fn table() -> LongTable {
    LongTable::from_records(vec![
        record("서울", "2018", "버스", Some(120_000.0)),
        record("서울", "2018", "지하철", Some(300_000.0)),
        record("서울", "2019", "버스", Some(130_000.0)),
        record("서울", "2019", "지하철", None),
        record("부산", "2018", "버스", Some(-20_000.0)),
        record("부산", "2019", "버스", Some(50_000.0)),
    ])
}

#[test]
fn warning_view_builds_no_frame() {
    let view = ChartView::Warning("nothing".to_owned());
    let frame = build_chart_frame(&view, Viewport::default(), &DashboardStyle::default())
        .expect("warning view is not an error");
    assert!(frame.is_none());
    assert_eq!(value_axis_title(&view), None);
}

#[test]
fn line_frame_has_axis_titles_markers_and_legend() {
    let view = ChartView::build(&table(), &selected(), ChartMode::Line);
    let frame = build_chart_frame(&view, Viewport::new(1000, 500), &DashboardStyle::default())
        .expect("line frame")
        .expect("line view draws");

    frame.validate().expect("frame is drawable");
    assert_eq!(frame.texts_matching(YEAR_AXIS_LABEL).count(), 1);
    assert_eq!(frame.texts_matching(VALUE_AXIS_LABEL).count(), 1);
    assert_eq!(frame.texts_matching("2018").count(), 1);
    assert_eq!(frame.texts_matching("서울, 버스").count(), 1);
    assert_eq!(frame.texts_matching("부산, 버스").count(), 1);

    // Five present values, one round marker each.
    let markers = frame
        .rects
        .iter()
        .filter(|rect| rect.corner_radius > 0.0)
        .count();
    assert_eq!(markers, 5);
}

#[test]
fn bar_sum_frame_draws_one_bar_per_year_without_legend() {
    let view = ChartView::build(&table(), &selected(), ChartMode::BarSum);
    let style = DashboardStyle::default();
    let frame = build_chart_frame(&view, Viewport::new(800, 400), &style)
        .expect("bar frame")
        .expect("bar view draws");

    assert_eq!(frame.rects.len(), 2);
    assert_eq!(frame.texts_matching(TOTAL_AXIS_LABEL).count(), 1);
    assert!(frame.rects.iter().all(|rect| rect.fill_color == style.bar_sum_color));
    assert_eq!(value_axis_title(&view), Some(TOTAL_AXIS_LABEL));
}

#[test]
fn stacked_frame_stacks_negative_segments_below_zero() {
    let view = ChartView::build(&table(), &["버스".to_owned()], ChartMode::StackedBar);
    let frame = build_chart_frame(&view, Viewport::new(800, 400), &DashboardStyle::default())
        .expect("stacked frame")
        .expect("stacked view draws");

    // 2018 버스 sums to 100,000 and 2019 버스 to 180,000; one legend swatch.
    assert_eq!(frame.rects.len(), 3);
    assert_eq!(frame.texts_matching("버스").count(), 1);

    let negative = LongTable::from_records(vec![
        record("서울", "2018", "버스", Some(-5.0)),
        record("서울", "2018", "지하철", Some(10.0)),
    ]);
    let view = ChartView::build(&negative, &selected(), ChartMode::StackedBar);
    let frame = build_chart_frame(&view, Viewport::new(800, 400), &DashboardStyle::default())
        .expect("stacked frame")
        .expect("stacked view draws");

    let bus = frame.rects[0];
    let subway = frame.rects[1];
    // Screen y grows downward: the negative segment starts where the positive one ends.
    assert!((bus.y - (subway.y + subway.height)).abs() < 1e-9);
}

#[test]
fn null_renderer_counts_primitives() {
    let view = ChartView::build(&table(), &selected(), ChartMode::StackedBar);
    let frame = build_chart_frame(&view, Viewport::new(800, 400), &DashboardStyle::default())
        .expect("stacked frame")
        .expect("stacked view draws");

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_rect_count, frame.rects.len());
    assert_eq!(renderer.last_text_count, frame.texts.len());
}

#[test]
fn too_small_viewport_is_rejected() {
    let view = ChartView::build(&table(), &selected(), ChartMode::BarSum);
    assert!(build_chart_frame(&view, Viewport::new(60, 40), &DashboardStyle::default()).is_err());
}
