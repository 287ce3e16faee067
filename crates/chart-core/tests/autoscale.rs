// File: crates/chart-core/tests/autoscale.rs
// Purpose: Validate autoscale over mixed series types and panel layout.

use chart_core::geometry::{split_vertical, RectI32};
use chart_core::{Chart, Figure, RenderOptions, Series, Theme};

#[test]
fn autoscale_mixed_series() {
    let mut chart = Chart::new();

    // XY series
    chart.add_series(Series::line(vec![(0.0, 1.0), (5.0, 3.0)]));

    // Band with one undefined row
    chart.add_series(Series::band(vec![
        (2.0, 1.5, 6.0),
        (3.0, f64::NAN, f64::NAN),
        (4.0, 2.0, 5.5),
    ]));

    chart.autoscale_axes(0.0);

    // X spans 0..5 from line vs 2..4 from band => expect ~0..5
    assert!(chart.x_axis.min <= 0.0 + 1e-9);
    assert!(chart.x_axis.max >= 5.0 - 1e-9);

    // Y min uses line min 1.0 vs band low 1.5 => expect <= 1.0
    assert!(chart.y_axis.min <= 1.0 + 1e-9);
    // Y max uses band high 6.0
    assert!(chart.y_axis.max >= 6.0 - 1e-9);
}

#[test]
fn autoscale_includes_step_baseline() {
    let mut chart = Chart::new();
    chart.add_series(Series::step_fill(vec![(0.0, 120.0), (1.0, 150.0)], 100.0));
    chart.autoscale_axes(0.0);
    assert!((chart.y_axis.min - 100.0).abs() < 1e-9);
    assert!((chart.y_axis.max - 150.0).abs() < 1e-9);
}

#[test]
fn autoscale_without_finite_data_falls_back_to_unit_box() {
    let mut chart = Chart::new();
    chart.add_series(Series::line(vec![(f64::NAN, 1.0)]));
    chart.autoscale_axes(0.1);
    assert_eq!((chart.x_axis.min, chart.x_axis.max), (0.0, 1.0));
    assert_eq!((chart.y_axis.min, chart.y_axis.max), (0.0, 1.0));
}

#[test]
fn autoscale_single_point_gets_nonzero_span() {
    let mut chart = Chart::new();
    chart.add_series(Series::marker(10.0, 129.0));
    chart.autoscale_axes(0.0);
    assert!(chart.x_axis.max > chart.x_axis.min);
    assert!(chart.y_axis.max > chart.y_axis.min);
    assert!(chart.y_axis.min < 129.0 && chart.y_axis.max > 129.0);
}

#[test]
fn split_vertical_follows_ratios() {
    let rect = RectI32::from_ltwh(0, 0, 100, 520);
    let rows = split_vertical(rect, &[4, 1], 20);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].height(), 400);
    assert_eq!(rows[1].height(), 100);
    assert_eq!(rows[1].bottom, 520);
    assert_eq!(rows[1].top - rows[0].bottom, 20);
}

#[test]
fn linked_panels_share_x_range() {
    let mut a = Chart::new();
    a.add_series(Series::line(vec![(1.0, 1.0), (4.0, 2.0)]));
    a.autoscale_axes(0.0);
    let mut b = Chart::new();
    b.add_series(Series::line(vec![(0.0, 1.0), (3.0, 2.0)]));
    b.autoscale_axes(0.0);

    let mut fig = Figure::new(Theme::fast());
    fig.add_panel(a, 4);
    fig.add_panel(b, 1);
    fig.link_x_axes();

    assert!(fig.share_x);
    for p in &fig.panels {
        assert_eq!((p.chart.x_axis.min, p.chart.x_axis.max), (0.0, 4.0));
    }
    let rects = fig.panel_rects(&RenderOptions::default());
    assert_eq!(rects[0].left, rects[1].left);
    assert_eq!(rects[0].right, rects[1].right);
    let ratio = rects[0].height() as f64 / rects[1].height() as f64;
    assert!((ratio - 4.0).abs() < 0.05, "ratio {ratio}");
}

#[test]
fn theme_lookup_is_case_insensitive() {
    assert_eq!(Theme::find("FiveThirtyEight").unwrap().name, "fivethirtyeight");
    assert!(Theme::find("seaborn").is_err());
}
