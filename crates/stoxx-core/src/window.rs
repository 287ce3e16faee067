// File: crates/stoxx-core/src/window.rs
// Summary: SeriesWindow, the date-ordered daily OHLCV bars of one instrument over a requested range.

use chrono::NaiveDate;

use crate::datenum::date_to_num;
use crate::error::AnalysisError;

/// One trading day. Values the source could not supply are NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Immutable once built; `bars` dates are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    symbol: String,
    begin: NaiveDate,
    end: NaiveDate,
    bars: Vec<Bar>,
}

impl SeriesWindow {
    /// Build a window, rejecting bars whose dates are not strictly increasing.
    pub fn new(
        symbol: impl Into<String>,
        begin: NaiveDate,
        end: NaiveDate,
        bars: Vec<Bar>,
    ) -> Result<Self, AnalysisError> {
        for (i, pair) in bars.windows(2).enumerate() {
            if pair[1].date <= pair[0].date {
                return Err(AnalysisError::UnorderedDates {
                    index: i + 1,
                    date: pair[1].date,
                    previous: pair[0].date,
                });
            }
        }
        Ok(Self { symbol: symbol.into(), begin, end, bars })
    }

    pub fn empty(symbol: impl Into<String>, begin: NaiveDate, end: NaiveDate) -> Self {
        Self { symbol: symbol.into(), begin, end, bars: Vec::new() }
    }

    pub fn symbol(&self) -> &str { &self.symbol }
    /// Requested (not observed) first day.
    pub fn begin(&self) -> NaiveDate { self.begin }
    /// Requested (not observed) last day.
    pub fn end(&self) -> NaiveDate { self.end }
    pub fn bars(&self) -> &[Bar] { &self.bars }
    pub fn len(&self) -> usize { self.bars.len() }
    pub fn is_empty(&self) -> bool { self.bars.is_empty() }
    pub fn last(&self) -> Option<&Bar> { self.bars.last() }

    pub fn dates(&self) -> Vec<NaiveDate> { self.bars.iter().map(|b| b.date).collect() }
    pub fn date_nums(&self) -> Vec<f64> { self.bars.iter().map(|b| date_to_num(b.date)).collect() }
    pub fn opens(&self) -> Vec<f64> { self.bars.iter().map(|b| b.open).collect() }
    pub fn highs(&self) -> Vec<f64> { self.bars.iter().map(|b| b.high).collect() }
    pub fn lows(&self) -> Vec<f64> { self.bars.iter().map(|b| b.low).collect() }
    pub fn closes(&self) -> Vec<f64> { self.bars.iter().map(|b| b.close).collect() }
    pub fn volumes(&self) -> Vec<f64> { self.bars.iter().map(|b| b.volume).collect() }

    /// Smallest finite volume.
    pub fn volume_min(&self) -> Option<f64> {
        self.bars
            .iter()
            .map(|b| b.volume)
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.min(v))))
    }

    /// Mean over finite volumes.
    pub fn volume_mean(&self) -> Option<f64> {
        let (sum, n) = self
            .bars
            .iter()
            .map(|b| b.volume)
            .filter(|v| v.is_finite())
            .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
        (n > 0).then(|| sum / n as f64)
    }

    pub fn title(&self) -> String {
        format_title(&self.symbol, self.begin, self.end)
    }
}

/// `"AAPL   2020-01-01  to  2020-06-01"`: symbol, three spaces, begin, two spaces, `to`, two spaces, end.
pub fn format_title(symbol: &str, begin: NaiveDate, end: NaiveDate) -> String {
    format!("{}   {}  to  {}", symbol, begin.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
}

/// Sort by date and drop repeated dates, keeping the last occurrence.
pub fn sort_dedup(bars: &mut Vec<Bar>) {
    bars.sort_by_key(|b| b.date);
    bars.reverse();
    bars.dedup_by_key(|b| b.date);
    bars.reverse();
}
