// File: crates/stoxx-core/src/error.rs
// Summary: Error taxonomy for the analysis pipeline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::source::FetchError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The source had no bars for the symbol in range, or does not know the symbol.
    #[error("no data for {symbol} between {begin} and {end}")]
    DataUnavailable { symbol: String, begin: NaiveDate, end: NaiveDate },

    /// The source failed (network, provider or file error). Never retried here.
    #[error("fetching {symbol} failed: {source}")]
    Fetch {
        symbol: String,
        #[source]
        source: FetchError,
    },

    /// Fewer usable points than a window or polynomial degree needs.
    #[error("series has {got} usable points, {needed} required")]
    InsufficientSeriesLength { needed: usize, got: usize },

    /// Input that makes a fit or statistic undefined (e.g. repeated x values).
    #[error("numerically degenerate input: {0}")]
    NumericDegeneracy(String),

    #[error("dates must be strictly increasing: row {index} ({date}) follows {previous}")]
    UnorderedDates { index: usize, date: NaiveDate, previous: NaiveDate },
}
