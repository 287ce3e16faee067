// File: crates/stoxx-core/src/range.rs
// Summary: Requested calendar window, either explicit or as day offsets back from today.

use chrono::{Duration, NaiveDate};

use crate::config::ConfigError;

/// Largest accepted `end_days_back` (two years).
pub const MAX_END_DAYS_BACK: u32 = 2 * 365;
/// Accepted `span_days` bounds (roughly one quarter to five years).
pub const MIN_SPAN_DAYS: u32 = 93;
pub const MAX_SPAN_DAYS: u32 = 5 * 365;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub begin: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if begin >= end {
            return Err(ConfigError::Invalid {
                field: "range".into(),
                reason: format!("begin {begin} must be before end {end}"),
            });
        }
        Ok(Self { begin, end })
    }

    /// `end = today - end_days_back`, `begin = end - span_days`.
    pub fn from_offsets(today: NaiveDate, end_days_back: u32, span_days: u32) -> Result<Self, ConfigError> {
        if end_days_back > MAX_END_DAYS_BACK {
            return Err(ConfigError::Invalid {
                field: "end_days_back".into(),
                reason: format!("{end_days_back} exceeds {MAX_END_DAYS_BACK}"),
            });
        }
        if !(MIN_SPAN_DAYS..=MAX_SPAN_DAYS).contains(&span_days) {
            return Err(ConfigError::Invalid {
                field: "span_days".into(),
                reason: format!("{span_days} outside {MIN_SPAN_DAYS}..={MAX_SPAN_DAYS}"),
            });
        }
        let end = today - Duration::days(i64::from(end_days_back));
        let begin = end - Duration::days(i64::from(span_days));
        Self::new(begin, end)
    }

    pub fn days(&self) -> i64 { (self.end - self.begin).num_days() }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.begin <= date && date <= self.end
    }
}
