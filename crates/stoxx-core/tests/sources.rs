// File: crates/stoxx-core/tests/sources.rs
// Purpose: CSV directory loading and chart API response decoding.

mod common;

use std::fs;

use stoxx_core::source::parse_chart_json;
use stoxx_core::{BarSource, CsvSource, FetchError, MemorySource};

use common::{bars_from_closes, day};

#[test]
fn csv_source_reads_yahoo_export_layout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AAPL.csv"),
        "Date,Open,High,Low,Close,Adj Close,Volume\n\
         2020-01-03,74.3,75.1,74.1,74.4,73.2,146322800\n\
         2020-01-02,74.1,75.2,73.8,75.1,73.9,135480400\n\
         2020-01-06,73.4,74.99,73.19,74.95,73.8,118387200\n\
         2020-01-06,73.4,74.99,73.19,74.9,73.8,118387201\n\
         2019-12-31,72.5,73.4,72.4,73.4,72.3,100805600\n",
    )
    .unwrap();

    let src = CsvSource::new(dir.path());
    let w = src.fetch_daily_bars("AAPL", day(2020, 1, 1), day(2020, 1, 31)).unwrap();
    assert_eq!(w.len(), 3);
    assert_eq!(w.dates(), vec![day(2020, 1, 2), day(2020, 1, 3), day(2020, 1, 6)]);
    // duplicate date: last row wins
    assert_eq!(w.closes()[2], 74.9);
    assert_eq!(w.volumes()[0], 135_480_400.0);
}

#[test]
fn csv_source_tolerates_missing_values_and_adj_close_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("X.csv"),
        "date,open,high,low,adj_close,volume\n2020-01-02,1,2,0.5,null,10\n2020-01-03,1,2,0.5,1.5,\n",
    )
    .unwrap();
    let w = CsvSource::new(dir.path()).fetch_daily_bars("X", day(2020, 1, 1), day(2020, 1, 5)).unwrap();
    assert!(w.closes()[0].is_nan());
    assert_eq!(w.closes()[1], 1.5);
    assert!(w.volumes()[1].is_nan());
}

#[test]
fn csv_source_unknown_symbol_and_bad_dates() {
    let dir = tempfile::tempdir().unwrap();
    let src = CsvSource::new(dir.path());
    assert!(matches!(
        src.fetch_daily_bars("NOPE", day(2020, 1, 1), day(2020, 2, 1)),
        Err(FetchError::UnknownSymbol(s)) if s == "NOPE"
    ));

    fs::write(dir.path().join("BAD.csv"), "Date,Close\nyesterday,1\n").unwrap();
    assert!(matches!(
        src.fetch_daily_bars("BAD", day(2020, 1, 1), day(2020, 2, 1)),
        Err(FetchError::Malformed(_))
    ));
}

#[test]
fn csv_path_stays_inside_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("secret"), "Date,Close\n2020-01-02,1\n").unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();

    let src = CsvSource::new(&data);
    let path = src.path_for("../secret");
    assert_eq!(path.parent(), Some(data.as_path()));
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(".._secret.csv"));
    assert!(matches!(
        src.fetch_daily_bars("../secret", day(2020, 1, 1), day(2020, 2, 1)),
        Err(FetchError::UnknownSymbol(_))
    ));
    assert_eq!(src.path_for("TUI1.DE"), data.join("TUI1.DE.csv"));
}

#[test]
fn csv_source_reads_compact_dates() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Z.csv"), "date,close,volume\n20200102,10.5,100\n20200103,11,200\n").unwrap();
    let w = CsvSource::new(dir.path()).fetch_daily_bars("Z", day(2020, 1, 1), day(2020, 1, 31)).unwrap();
    assert_eq!(w.dates(), vec![day(2020, 1, 2), day(2020, 1, 3)]);
    assert_eq!(w.closes(), vec![10.5, 11.0]);
}

const CHART_OK: &str = r#"{"chart":{"result":[{
    "meta":{"currency":"USD","symbol":"AAPL","gmtoffset":-18000},
    "timestamp":[1577975400,1578061800,1578321000],
    "indicators":{"quote":[{
        "open":[74.06,74.29,null],
        "high":[75.15,75.14,null],
        "low":[73.80,74.13,null],
        "close":[75.09,null,null],
        "volume":[135480400,146322800,null]
    }]}
}],"error":null}}"#;

#[test]
fn chart_json_decodes_local_dates_and_nulls() {
    let bars = parse_chart_json("AAPL", CHART_OK).unwrap();
    // the all-null third row is dropped
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].date, day(2020, 1, 2));
    assert_eq!(bars[1].date, day(2020, 1, 3));
    assert_eq!(bars[0].close, 75.09);
    assert!(bars[1].close.is_nan());
    assert_eq!(bars[1].volume, 146_322_800.0);
}

#[test]
fn chart_json_errors() {
    let not_found = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
    assert!(matches!(parse_chart_json("ZZZZ", not_found), Err(FetchError::UnknownSymbol(s)) if s == "ZZZZ"));

    let bad_request = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input"}}}"#;
    assert!(matches!(parse_chart_json("A", bad_request), Err(FetchError::Api(m)) if m.contains("Invalid input")));

    assert!(matches!(parse_chart_json("A", "<html>"), Err(FetchError::Malformed(_))));

    let empty = r#"{"chart":{"result":[],"error":null}}"#;
    assert!(parse_chart_json("A", empty).unwrap().is_empty());
}

#[test]
fn memory_source_filters_and_sorts() {
    let mut bars = bars_from_closes(day(2020, 1, 1), &[1.0, 2.0, 3.0, 4.0]);
    bars.reverse();
    let src = MemorySource::new().with_bars("M", bars);
    let w = src.fetch_daily_bars("M", day(2020, 1, 2), day(2020, 1, 3)).unwrap();
    assert_eq!(w.closes(), vec![2.0, 3.0]);
    assert_eq!(w.begin(), day(2020, 1, 2));
    assert!(src.fetch_daily_bars("OTHER", day(2020, 1, 1), day(2020, 2, 1)).unwrap().is_empty());
}
