// File: crates/stoxx-core/src/source/csv.rs
// Summary: Bars from a directory of `<SYMBOL>.csv` files (Yahoo export layout or similar).

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use tracing::{debug, warn};

use super::{file_safe_symbol, into_window, BarSource, FetchError};
use crate::window::{Bar, SeriesWindow};

pub struct CsvSource {
    dir: PathBuf,
}

impl CsvSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    /// `<dir>/<symbol>.csv`; separators and other unsafe characters in `symbol` become `_`.
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", file_safe_symbol(symbol)))
    }
}

impl BarSource for CsvSource {
    fn name(&self) -> &str { "csv" }

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<SeriesWindow, FetchError> {
        let path = self.path_for(symbol);
        if !path.is_file() {
            return Err(FetchError::UnknownSymbol(symbol.to_string()));
        }
        let bars = load_bars(&path)?;
        let rows = bars.len();
        debug!(symbol, path = %path.display(), rows, "loaded csv");
        let window = into_window(symbol, begin, end, bars)?;
        if rows > 0 && window.is_empty() {
            warn!(symbol, path = %path.display(), rows, %begin, %end, "no rows inside the requested range");
        }
        Ok(window)
    }
}

fn load_bars(path: &Path) -> Result<Vec<Bar>, FetchError> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_path(path)?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();

    let idx = |names: &[&str]| -> Option<usize> {
        names.iter().find_map(|want| headers.iter().position(|h| h == want))
    };

    let i_date = idx(&["date", "datetime", "time", "timestamp"])
        .ok_or_else(|| FetchError::Malformed(format!("{}: no date column", path.display())))?;
    let i_open = idx(&["open", "o"]);
    let i_high = idx(&["high", "h"]);
    let i_low = idx(&["low", "l"]);
    let i_close = idx(&["close", "c", "close_price"]).or_else(|| idx(&["adj close", "adj_close"]));
    let i_volume = idx(&["volume", "vol", "v"]);
    if i_close.is_none() {
        warn!(path = %path.display(), ?headers, "no close column; closes will be undefined");
    }

    let mut out = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let parse = |i: Option<usize>| -> f64 {
            i.and_then(|ix| rec.get(ix))
                .and_then(|s| s.parse::<f64>().ok())
                .unwrap_or(f64::NAN)
        };
        let raw_date = rec.get(i_date).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| {
            FetchError::Malformed(format!("{}: row {}: bad date '{}'", path.display(), row + 2, raw_date))
        })?;
        out.push(Bar {
            date,
            open: parse(i_open),
            high: parse(i_high),
            low: parse(i_low),
            close: parse(i_close),
            volume: parse(i_volume),
        });
    }
    Ok(out)
}

/// `YYYY-MM-DD`, compact `YYYYMMDD`, an RFC 3339 timestamp, or epoch seconds/milliseconds.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d") {
            return Some(d);
        }
    }
    if let Ok(n) = s.parse::<i64>() {
        // epoch ms -> sec
        let secs = if n > 10_i64.pow(12) { n / 1000 } else { n };
        return DateTime::from_timestamp(secs, 0).map(|dt| dt.date_naive());
    }
    None
}
