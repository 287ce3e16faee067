// File: crates/stoxx-core/src/source/mod.rs
// Summary: Daily bar providers behind one trait (remote chart API, CSV directory, in-memory).

use chrono::NaiveDate;
use thiserror::Error;

use crate::window::SeriesWindow;

mod csv;
mod memory;
mod yahoo;

pub use self::csv::CsvSource;
pub use self::memory::MemorySource;
pub use self::yahoo::{parse_chart_json, YahooSource};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with an error payload.
    #[error("provider error: {0}")]
    Api(String),

    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),

    #[error("csv: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// Response or file did not have the expected shape.
    #[error("malformed data: {0}")]
    Malformed(String),
}

/// Source of daily OHLCV bars. Implementations return bars sorted by date with
/// duplicate dates removed, restricted to `begin..=end`; an empty window is a
/// valid answer. Calls are synchronous and never retried.
pub trait BarSource {
    fn name(&self) -> &str;

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<SeriesWindow, FetchError>;
}

impl<T: BarSource + ?Sized> BarSource for Box<T> {
    fn name(&self) -> &str { (**self).name() }

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<SeriesWindow, FetchError> {
        (**self).fetch_daily_bars(symbol, begin, end)
    }
}

/// `symbol` with everything but ASCII alphanumerics, `.` and `-` replaced by `_`,
/// so it can name a file without leaving its directory.
pub(crate) fn file_safe_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

// Sources sort and dedup first, so ordering cannot fail here.
pub(crate) fn into_window(
    symbol: &str,
    begin: NaiveDate,
    end: NaiveDate,
    mut bars: Vec<crate::window::Bar>,
) -> Result<SeriesWindow, FetchError> {
    bars.retain(|b| begin <= b.date && b.date <= end);
    crate::window::sort_dedup(&mut bars);
    SeriesWindow::new(symbol, begin, end, bars).map_err(|e| FetchError::Malformed(e.to_string()))
}
