// File: crates/stoxx-core/tests/config.rs
// Purpose: TOML configuration defaults, overrides and validation.

mod common;

use std::path::PathBuf;

use stoxx_core::{AppConfig, ConfigError, SourceKind, ViewKind};

use common::day;

#[test]
fn empty_file_yields_defaults() {
    let cfg = AppConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.symbols, vec!["AAPL".to_string(), "TUI1.DE".to_string()]);
    assert_eq!(cfg.analysis.window_size, 20);
    assert_eq!(cfg.analysis.n_std, 2.0);
    assert_eq!(cfg.analysis.trend_degrees, vec![1, 3]);
    assert_eq!(cfg.view, ViewKind::Analytical);
    assert_eq!((cfg.width, cfg.height), (2000, 1000));
    assert_eq!(cfg.theme().unwrap().name, "fivethirtyeight");
    cfg.validate().unwrap();
}

#[test]
fn full_file_parses() {
    let cfg = AppConfig::from_toml_str(
        r#"
        symbols = ["GOOGL", " ZM "]
        end_days_back = 7
        span_days = 180
        view = "simple"
        style = "dark"
        output_dir = "charts"
        source = "csv"
        data_dir = "fixtures"

        [analysis]
        window_size = 10
        n_std = 1.5
        "#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.symbols(), vec!["GOOGL".to_string(), "ZM".to_string()]);
    assert_eq!(cfg.view, ViewKind::Simple);
    assert_eq!(cfg.source, SourceKind::Csv);
    assert_eq!(cfg.output_dir, PathBuf::from("charts"));
    assert_eq!(cfg.theme().unwrap().name, "dark");
    assert_eq!(cfg.analysis.window_size, 10);

    let range = cfg.date_range(day(2024, 1, 8)).unwrap();
    assert_eq!(range.end, day(2024, 1, 1));
    assert_eq!(range.days(), 180);
}

#[test]
fn simple_view_defaults_to_fast_style() {
    let cfg = AppConfig::from_toml_str("view = \"simple\"").unwrap();
    assert_eq!(cfg.theme().unwrap().name, "fast");
}

#[test]
fn explicit_dates_win_over_offsets() {
    let cfg = AppConfig::from_toml_str("begin = \"2020-01-01\"\nend = \"2020-06-01\"").unwrap();
    let range = cfg.date_range(day(2024, 1, 1)).unwrap();
    assert_eq!((range.begin, range.end), (day(2020, 1, 1), day(2020, 6, 1)));

    let half = AppConfig::from_toml_str("begin = \"2020-01-01\"").unwrap();
    assert!(matches!(half.validate(), Err(ConfigError::Invalid { .. })));
}

#[test]
fn unknown_keys_and_bad_values_are_rejected() {
    assert!(matches!(AppConfig::from_toml_str("symbolz = [\"A\"]"), Err(ConfigError::Parse(_))));
    assert!(matches!(AppConfig::from_toml_str("source = \"ftp\""), Err(ConfigError::Parse(_))));

    let bad_style = AppConfig::from_toml_str("style = \"seaborn\"").unwrap();
    assert!(matches!(bad_style.validate(), Err(ConfigError::Style(_))));

    let fixed = AppConfig::from_toml_str("[analysis]\ntrend_degrees = [2]").unwrap();
    assert!(matches!(fixed.validate(), Err(ConfigError::Invalid { field, .. }) if field == "analysis.trend_degrees"));

    let no_symbols = AppConfig::from_toml_str("symbols = []").unwrap();
    assert!(no_symbols.validate().is_err());

    let tiny = AppConfig::from_toml_str("[analysis]\nwindow_size = 1").unwrap();
    assert!(tiny.validate().is_err());

    let span = AppConfig::from_toml_str("span_days = 10").unwrap();
    assert!(span.date_range(day(2024, 1, 1)).is_err());
}

#[test]
fn load_reports_missing_file() {
    let err = AppConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stoxx.toml");
    std::fs::write(&path, "symbols = [\"MSFT\"]\n").unwrap();
    assert_eq!(AppConfig::load(&path).unwrap().symbols, vec!["MSFT".to_string()]);
}

#[test]
fn view_and_source_parse_from_strings() {
    assert_eq!("Simple".parse::<ViewKind>().unwrap(), ViewKind::Simple);
    assert_eq!("analytical".parse::<ViewKind>().unwrap().to_string(), "analytical");
    assert!("pie".parse::<ViewKind>().is_err());
    assert_eq!(" CSV ".parse::<SourceKind>().unwrap(), SourceKind::Csv);
}
