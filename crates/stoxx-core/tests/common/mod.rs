// File: crates/stoxx-core/tests/common/mod.rs
// Purpose: Bar fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use stoxx_core::Bar;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One bar per calendar day from `start`, close = `closes[i]`, other fields derived.
pub fn bars_from_closes(start: NaiveDate, closes: &[f64]) -> Vec<Bar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar {
            date: start + Duration::days(i as i64),
            open: c - 0.5,
            high: c + 1.0,
            low: c - 1.0,
            close: c,
            volume: 1_000.0 + 10.0 * i as f64,
        })
        .collect()
}

/// 30 daily bars with closes 100, 101, ..., 129.
pub fn linear_bars(start: NaiveDate) -> Vec<Bar> {
    let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    bars_from_closes(start, &closes)
}
