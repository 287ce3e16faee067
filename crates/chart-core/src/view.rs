// File: crates/chart-core/src/view.rs
// Visible data extents and autoscale helpers.

use crate::Chart;
use crate::series::SeriesType;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewState {
    /// Extents over all finite data in `chart`, padded on Y by `margin` (fraction of span).
    /// Falls back to a unit box when there is nothing finite to measure.
    pub fn from_chart(chart: &Chart, margin: f64) -> Self {
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let mut take = |x: f64, y: f64| {
            if x.is_finite() && y.is_finite() {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        };
        for s in &chart.series {
            match s.series_type {
                SeriesType::Band => {
                    for &(x, lo, hi) in &s.data_band {
                        if lo.is_finite() && hi.is_finite() {
                            take(x, lo);
                            take(x, hi);
                        }
                    }
                }
                SeriesType::StepFill => {
                    for &(x, y) in &s.data_xy {
                        take(x, y);
                        if let Some(b) = s.baseline { take(x, b); }
                    }
                }
                SeriesType::Line | SeriesType::HLine | SeriesType::Marker => {
                    for &(x, y) in &s.data_xy { take(x, y); }
                }
            }
        }
        if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
            return Self { x_min: 0.0, x_max: 1.0, y_min: 0.0, y_max: 1.0 };
        }
        if (x_max - x_min).abs() < 1e-9 { x_min -= 0.5; x_max += 0.5; }
        if (y_max - y_min).abs() < 1e-9 {
            let pad = (y_min.abs() * 0.05).max(0.5);
            y_min -= pad;
            y_max += pad;
        }
        let ym = (y_max - y_min) * margin.max(0.0);
        Self { x_min, x_max, y_min: y_min - ym, y_max: y_max + ym }
    }

    pub fn apply_to_chart(&self, chart: &mut Chart) {
        chart.x_axis.min = self.x_min;
        chart.x_axis.max = self.x_max;
        chart.y_axis.min = self.y_min;
        chart.y_axis.max = self.y_max;
    }
}
