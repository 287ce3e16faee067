// File: crates/chart-core/src/datenum.rs
// Summary: Calendar date <-> numeric x conversion used by date axes and by callers placing dated data.
//
// Numbers are days since 1970-01-01.

use chrono::{Duration, NaiveDate};

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

pub fn date_to_num(date: NaiveDate) -> f64 {
    (date - epoch()).num_days() as f64
}

/// Nearest calendar date for `value`; `None` when non-finite or out of chrono's range.
pub fn num_to_date(value: f64) -> Option<NaiveDate> {
    if !value.is_finite() || value.abs() > 1.0e8 {
        return None;
    }
    epoch().checked_add_signed(Duration::days(value.round() as i64))
}
