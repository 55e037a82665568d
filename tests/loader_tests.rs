use std::io::Write;

use tempfile::NamedTempFile;
use transit_viz::DashboardError;
use transit_viz::api::{LoadStrategy, TableCache, load_table, load_table_from_bytes};
use transit_viz::core::{Cell, EncodingTag};
use transit_viz::error::LoadError;

fn csv_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(bytes).expect("write csv");
    file.flush().expect("flush csv");
    file
}

#[test]
fn plain_utf8_is_read_with_the_first_strategy() {
    let table = load_table_from_bytes("구분,년(Annual),버스\n서울,2018,100\n".as_bytes())
        .expect("utf-8 csv should load");

    assert_eq!(table.encoding(), EncodingTag::Utf8);
    assert_eq!(table.columns(), ["구분", "년(Annual)", "버스"]);
    assert_eq!(
        table.rows()[0],
        vec![Cell::Text("서울".to_owned()), Cell::Int(2018), Cell::Int(100)]
    );
}

#[test]
fn byte_order_mark_is_tagged_utf8_sig() {
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice("구분,버스\n서울,1\n".as_bytes());

    let table = load_table_from_bytes(&bytes).expect("bom csv should load");
    assert_eq!(table.encoding(), EncodingTag::Utf8Sig);
    assert_eq!(table.columns()[0], "구분");
}

#[test]
fn korean_legacy_encoding_falls_through_to_cp949() {
    let (bytes, _, had_errors) =
        encoding_rs::EUC_KR.encode("구분,년(Annual),버스\n서울,2018,100\n");
    assert!(!had_errors);

    let table = load_table_from_bytes(&bytes).expect("euc-kr csv should load");
    assert_eq!(table.encoding(), EncodingTag::Cp949);
    assert_eq!(table.columns(), ["구분", "년(Annual)", "버스"]);
    assert_eq!(table.rows()[0][0], Cell::Text("서울".to_owned()));
}

#[test]
fn undecodable_bytes_fall_back_to_latin1() {
    let table = load_table_from_bytes(b"year,name,v\n2020,caf\xe9,5\n")
        .expect("latin1 csv should load");

    assert_eq!(table.encoding(), EncodingTag::Latin1);
    assert_eq!(table.rows()[0][1], Cell::Text("café".to_owned()));
}

#[test]
fn quote_damage_is_recovered_by_the_lenient_strategy() {
    let table = load_table_from_bytes(b"a,b,c\n1,\"x\ny\",2,3\n")
        .expect("lenient fallback should load");

    assert_eq!(table.encoding(), EncodingTag::Utf8Lenient);
    assert!(table.encoding().is_lenient());
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.rows()[0][1], Cell::Text("\"x".to_owned()));
    assert_eq!(table.rows()[0][2], Cell::Missing);
}

#[test]
fn every_strategy_failing_yields_no_table() {
    let err = load_table_from_bytes(b"a,b,c\n1,2,3,4\n").expect_err("ragged rows must fail");
    assert!(matches!(
        err,
        LoadError::RaggedRow {
            expected: 3,
            found: 4,
            ..
        }
    ));
}

#[test]
fn empty_input_has_no_columns() {
    let err = load_table_from_bytes(b"").expect_err("empty input must fail");
    assert!(matches!(err, LoadError::NoColumns));
}

#[test]
fn short_rows_are_padded_with_missing_cells() {
    let table = load_table_from_bytes(b"a,b,c\n1,2\n").expect("short row should load");
    assert_eq!(table.rows()[0].len(), 3);
    assert_eq!(table.rows()[0][2], Cell::Missing);
}

#[test]
fn utf8_strategy_rejects_a_byte_order_mark() {
    let err = LoadStrategy::strict(EncodingTag::Utf8)
        .load(b"\xEF\xBB\xBFa,b\n1,2\n")
        .expect_err("utf-8 attempt should refuse a bom");
    assert!(matches!(
        err,
        LoadError::Decode {
            encoding: EncodingTag::Utf8
        }
    ));
}

#[test]
fn missing_file_is_a_load_failure() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");

    let err = load_table(&path).expect_err("missing file must fail");
    assert!(err.is_halting());
    match err {
        DashboardError::Load { path: failed, source } => {
            assert_eq!(failed, path);
            assert!(matches!(source, LoadError::Io(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn cache_reuses_successful_loads_and_skips_failures() {
    let file = csv_file("구분,버스\n서울,1\n".as_bytes());
    let cache = TableCache::new();

    let first = cache.get_or_load(file.path()).expect("first load");
    let second = cache.get_or_load(file.path()).expect("cached load");
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    let stats = cache.stats();
    assert_eq!((stats.hits, stats.misses, stats.size), (1, 1, 1));

    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.csv");
    assert!(cache.get_or_load(&missing).is_err());
    assert_eq!(cache.stats().size, 1);

    cache.clear();
    assert_eq!(cache.stats().size, 0);
    let reloaded = cache.get_or_load(file.path()).expect("reload after clear");
    assert!(!std::sync::Arc::ptr_eq(&first, &reloaded));
}
