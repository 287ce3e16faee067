// File: crates/stoxx-core/src/datenum.rs
// Summary: Date encoding for fitting, re-exported from chart-core so trends and date axes share one unit.

pub use chart_core::datenum::{date_to_num, num_to_date};
