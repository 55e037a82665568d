use transit_viz::DashboardError;
use transit_viz::api::{ColumnHints, ColumnSelection, FilterSelection, SelectionDefaults};
use transit_viz::core::{Cell, EncodingTag, MeltColumns, RawTable, melt};

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

fn wide_table() -> RawTable {
    let columns = names(&["구분", "년(Annual)", "버스", "지하철", "택시", "도보"]);
    let mut rows = Vec::new();
    for region in ["서울", "부산", "대구", "인천", "광주", "대전", "울산"] {
        for year in [2018, 2019] {
            rows.push(vec![
                Cell::Text(region.to_owned()),
                Cell::Int(year),
                Cell::Int(1),
                Cell::Int(2),
                Cell::Int(3),
                Cell::Int(4),
            ]);
        }
    }
    RawTable::new(columns, rows, EncodingTag::Utf8).expect("valid table")
}

#[test]
fn hinted_columns_are_preselected() {
    let columns = names(&["구분", "년(Annual)", "버스", "지하철"]);
    let selection = ColumnSelection::guess(&columns, &ColumnHints::default()).expect("guess");

    assert_eq!(selection.year_column(), "년(Annual)");
    assert_eq!(selection.region_column(), "구분");
    assert_eq!(selection.transport_candidates(), names(&["버스", "지하철"]));
}

#[test]
fn without_hints_the_first_two_columns_are_used() {
    let columns = names(&["연도", "시도", "버스"]);
    let selection = ColumnSelection::guess(&columns, &ColumnHints::default()).expect("guess");

    assert_eq!(selection.year_column(), "연도");
    assert_eq!(selection.region_column(), "시도");
    assert_eq!(selection.transport_candidates(), names(&["버스"]));
}

#[test]
fn two_column_table_has_no_transport_candidates() {
    let columns = names(&["연도", "시도"]);
    let selection = ColumnSelection::guess(&columns, &ColumnHints::default()).expect("guess");

    assert!(selection.transport_candidates().is_empty());
    assert!(matches!(
        selection.require_transport_candidates(),
        Err(DashboardError::NoTransportColumns)
    ));
}

#[test]
fn overriding_a_column_recomputes_candidates() {
    let columns = names(&["구분", "년(Annual)", "버스", "지하철"]);
    let mut selection =
        ColumnSelection::guess(&columns, &ColumnHints::default()).expect("guess");

    assert!(selection.set_year_column("버스").expect("known column"));
    assert_eq!(selection.transport_candidates(), names(&["년(Annual)", "지하철"]));
    assert!(!selection.set_year_column("버스").expect("same column"));

    assert!(matches!(
        selection.set_region_column("없음"),
        Err(DashboardError::UnknownColumn(name)) if name == "없음"
    ));
}

#[test]
fn same_column_for_year_and_region_leaves_the_rest_as_candidates() {
    let columns = names(&["구분", "년(Annual)", "버스"]);
    let mut selection =
        ColumnSelection::guess(&columns, &ColumnHints::default()).expect("guess");
    selection.set_region_column("년(Annual)").expect("known column");

    assert_eq!(selection.transport_candidates(), names(&["구분", "버스"]));
}

#[test]
fn default_filters_select_all_years_six_regions_three_transports() {
    let table = wide_table();
    let candidates = names(&["버스", "지하철", "택시", "도보"]);
    let filters = FilterSelection::with_defaults(
        &table,
        "년(Annual)",
        "구분",
        &candidates,
        SelectionDefaults::default(),
    )
    .expect("filters");

    assert_eq!(filters.years.selected(), names(&["2018", "2019"]));
    assert_eq!(
        filters.regions.selected(),
        names(&["서울", "부산", "대구", "인천", "광주", "대전"])
    );
    assert_eq!(filters.transports.selected(), names(&["버스", "지하철", "택시"]));
    assert!(!filters.keeps_row("2018", "울산"));
    assert!(filters.keeps_row("2019", "서울"));
}

#[test]
fn selections_stay_in_option_order_and_reject_unknown_values() {
    let table = wide_table();
    let candidates = names(&["버스", "지하철", "택시", "도보"]);
    let mut filters = FilterSelection::with_defaults(
        &table,
        "년(Annual)",
        "구분",
        &candidates,
        SelectionDefaults::default(),
    )
    .expect("filters");

    filters
        .transports
        .set_selected(["도보", "버스"])
        .expect("known transports");
    assert_eq!(filters.transports.selected(), names(&["버스", "도보"]));

    let err = filters
        .years
        .set_selected(["2030"])
        .expect_err("unknown year must be rejected");
    assert!(matches!(
        err,
        DashboardError::UnknownOption { kind: "year", .. }
    ));
    assert_eq!(filters.years.selected(), names(&["2018", "2019"]));

    filters.regions.toggle("울산", true).expect("known region");
    filters.regions.toggle("서울", false).expect("known region");
    assert!(filters.regions.is_selected("울산"));
    assert!(!filters.regions.is_selected("서울"));
}

#[test]
fn melt_emits_one_record_per_surviving_row_and_candidate() {
    let table = wide_table();
    let candidates = names(&["버스", "지하철", "택시", "도보"]);
    let filters = FilterSelection::with_defaults(
        &table,
        "년(Annual)",
        "구분",
        &candidates,
        SelectionDefaults::default(),
    )
    .expect("filters");

    let melted = melt(
        &table,
        MeltColumns {
            year: "년(Annual)",
            region: "구분",
            transports: &candidates,
        },
        |year, region| filters.keeps_row(year, region),
    )
    .expect("melt");

    // Six regions x two years survive; every candidate is melted.
    assert_eq!(melted.len(), 6 * 2 * candidates.len());
    let first: Vec<&str> = melted
        .iter()
        .take(4)
        .map(|record| record.transport.as_str())
        .collect();
    assert_eq!(first, vec!["버스", "지하철", "택시", "도보"]);
    assert_eq!(melted[0].region, "서울");
    assert_eq!(melted[0].year, "2018");
    assert!(melted.iter().all(|record| record.region != "울산"));
}

#[test]
fn float_year_columns_use_their_text_form() {
    let table = RawTable::new(
        names(&["년(Annual)", "구분", "버스"]),
        vec![
            vec![Cell::Float(2018.0), Cell::Text("서울".to_owned()), Cell::Int(5)],
            vec![Cell::Missing, Cell::Text("서울".to_owned()), Cell::Int(6)],
        ],
        EncodingTag::Utf8,
    )
    .expect("valid table");

    let years = table.distinct_text("년(Annual)").expect("known column");
    let years: Vec<&str> = years.iter().map(String::as_str).collect();
    assert_eq!(years, vec!["2018.0", "nan"]);
}
