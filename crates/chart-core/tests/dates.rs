// File: crates/chart-core/tests/dates.rs
// Purpose: Day-number conversion and date tick labels agree with each other.

use chart_core::datenum::{date_to_num, num_to_date};
use chart_core::Axis;
use chrono::NaiveDate;

#[test]
fn date_axis_labels_use_day_numbers() {
    let d = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    assert_eq!(date_to_num(d), 18262.0);
    assert_eq!(num_to_date(18262.4), Some(d));

    let axis = Axis::date("Date", 18262.0, 18300.0);
    assert_eq!(axis.format_tick(date_to_num(d)), "2020-01-01");
    assert_eq!(axis.format_tick(0.0), "1970-01-01");
}

#[test]
fn unrepresentable_day_numbers_have_no_label() {
    assert_eq!(num_to_date(f64::NAN), None);
    assert_eq!(num_to_date(1.0e9), None);
    assert_eq!(Axis::date("Date", 0.0, 1.0).format_tick(f64::INFINITY), "");
}
