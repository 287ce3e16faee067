// File: crates/stoxx-core/src/compose.rs
// Summary: Builds the simple price-band figure and the two-panel trend/volatility figure.
//
// Pure layout and encoding: no fetching, no statistics, no drawing. Layers that
// have nothing finite to show are left out; panels and the title always stay.

use chart_core::{Axis, Chart, Color, Figure, LineDash, Series, Style, Theme};
use tracing::debug;

use crate::analysis::Analysis;
use crate::datenum::date_to_num;
use crate::trend::TrendCurve;
use crate::window::SeriesWindow;

const BLUE: Color = Color::from_rgb(0, 0, 255);
const VIOLET: Color = Color::from_rgb(238, 130, 238);
const RED: Color = Color::from_rgb(255, 0, 0);
const MAGENTA: Color = Color::from_rgb(255, 0, 255);
const YELLOW: Color = Color::from_rgb(255, 255, 0);
const BLACK: Color = Color::from_rgb(0, 0, 0);
const GREY: Color = Color::from_rgb(128, 128, 128);
const PURPLE: Color = Color::from_rgb(128, 0, 128);
const LIME: Color = Color::from_rgb(0, 255, 0);
const GREEN: Color = Color::from_rgb(0, 128, 0);

/// Radius of the last-close marker, in pixels.
pub const LAST_CLOSE_RADIUS: f32 = 14.0;
/// Price to volume panel height ratio.
pub const PANEL_RATIOS: (u32, u32) = (4, 1);
const Y_MARGIN: f64 = 0.02;

#[derive(Clone, Copy, Debug)]
pub struct ChartComposer {
    theme: Theme,
    n_std: f64,
}

impl ChartComposer {
    pub fn new(theme: Theme) -> Self {
        Self { theme, n_std: 2.0 }
    }

    pub fn with_n_std(mut self, n_std: f64) -> Self {
        self.n_std = n_std;
        self
    }

    pub fn theme(&self) -> &Theme { &self.theme }

    pub fn n_std(&self) -> f64 { self.n_std }

    /// Open, close, high and low lines with open/close and high/low bands.
    pub fn simple_view(&self, window: &SeriesWindow) -> Figure {
        let xs = window.date_nums();
        let (opens, closes) = (window.opens(), window.closes());
        let (highs, lows) = (window.highs(), window.lows());

        let mut chart = Chart::new();
        chart.legend = true;
        chart.grid = false;
        chart.add_series(
            Series::line(zip_xy(&xs, &opens))
                .with_style(Style::stroke(BLUE, 6.0).alpha(0.7))
                .with_label("open"),
        );
        chart.add_series(
            Series::line(zip_xy(&xs, &closes))
                .with_style(Style::stroke(VIOLET, 6.0).alpha(0.7))
                .with_label("close"),
        );
        chart.add_series(
            Series::line(zip_xy(&xs, &highs))
                .with_style(Style::stroke(RED, 1.0).alpha(0.7))
                .with_label("high"),
        );
        chart.add_series(
            Series::line(zip_xy(&xs, &lows))
                .with_style(Style::stroke(MAGENTA, 1.0).alpha(0.7))
                .with_label("low"),
        );
        chart.add_series(Series::band(zip_band(&xs, &opens, &closes)).with_style(Style::fill(YELLOW, 0.6)));
        chart.add_series(Series::band(zip_band(&xs, &lows, &highs)).with_style(Style::fill(BLACK, 0.2)));

        self.finish_axes(&mut chart, window, "Price");
        Figure::single(chart, self.theme).with_title(window.title())
    }

    /// Price panel with rolling mean, deviation band, trends and last close over a volume panel.
    pub fn analytical_view(&self, window: &SeriesWindow, analysis: &Analysis) -> Figure {
        let xs = window.date_nums();
        let closes = window.closes();

        let mut price = Chart::new();
        price.legend = true;
        price.add_series(
            Series::line(zip_xy(&xs, &closes))
                .with_style(Style::stroke(GREY, 2.0).alpha(0.5))
                .with_label("Close"),
        );
        price.add_series(
            Series::band(zip_band(&xs, &window.lows(), &window.highs()))
                .with_style(Style::fill(YELLOW, 0.3))
                .with_label("high/low"),
        );

        if analysis.band.is_undefined() {
            debug!(symbol = window.symbol(), "no rolling statistics to draw");
        } else {
            let mean: Vec<(f64, f64)> = xs
                .iter()
                .zip(&analysis.band.mean)
                .map(|(&x, m)| (x, m.unwrap_or(f64::NAN)))
                .collect();
            price.add_series(
                Series::line(mean)
                    .with_style(Style::stroke(BLUE, 2.0))
                    .with_label("Close rolling mean"),
            );
            let envelope: Vec<(f64, f64, f64)> = xs
                .iter()
                .zip(analysis.band.envelope(self.n_std))
                .map(|(&x, e)| match e {
                    Some((lo, hi)) => (x, lo, hi),
                    None => (x, f64::NAN, f64::NAN),
                })
                .collect();
            price.add_series(
                Series::band(envelope)
                    .with_style(Style::fill(BLUE, 0.1))
                    .with_label(format!("{}*standard deviation", self.n_std)),
            );
        }

        if let Some(curve) = &analysis.cubic {
            price.add_series(trend_series(curve, &xs).with_style(Style::stroke(RED, 3.0)).with_label("trend 3grd"));
        }
        if let Some(curve) = &analysis.linear {
            price.add_series(trend_series(curve, &xs).with_style(Style::stroke(PURPLE, 1.0)).with_label("trend 1grd"));
        }

        match window.bars().iter().rev().find(|b| b.close.is_finite()) {
            Some(last) => price.add_series(
                Series::marker(date_to_num(last.date), last.close)
                    .with_style(Style::marker(RED, LAST_CLOSE_RADIUS)),
            ),
            None => debug!(symbol = window.symbol(), "no close to mark"),
        }
        self.finish_axes(&mut price, window, "Price");

        let mut volume = Chart::new();
        volume.legend = true;
        let volumes = window.volumes();
        if let (Some(min), Some(mean)) = (window.volume_min(), window.volume_mean()) {
            volume.add_series(
                Series::step_fill(zip_xy(&xs, &volumes), min).with_style(Style::fill(LIME, 1.0)),
            );
            if let (Some(&first), Some(&last)) = (xs.first(), xs.last()) {
                volume.add_series(
                    Series::hline(mean, first, last)
                        .with_style(Style::stroke(GREEN, 2.0).dashed(LineDash::DashDot))
                        .with_label("mean volume"),
                );
            }
        } else {
            debug!(symbol = window.symbol(), "no volume to draw");
        }
        self.finish_axes(&mut volume, window, "Volume");

        let mut figure = Figure::new(self.theme).with_title(window.title());
        figure.add_panel(price, PANEL_RATIOS.0);
        figure.add_panel(volume, PANEL_RATIOS.1);
        figure.link_x_axes();
        figure
    }

    // Fit axes to data; charts without data span the requested range instead.
    fn finish_axes(&self, chart: &mut Chart, window: &SeriesWindow, y_label: &str) {
        chart.autoscale_axes(Y_MARGIN);
        let (x_min, x_max) = if window.is_empty() {
            (date_to_num(window.begin()), date_to_num(window.end()))
        } else {
            (chart.x_axis.min, chart.x_axis.max)
        };
        chart.x_axis = Axis::date("Date", x_min, x_max);
        chart.y_axis.label = y_label.to_string();
    }
}

fn trend_series(curve: &TrendCurve, xs: &[f64]) -> Series {
    Series::line(xs.iter().map(|&x| (x, curve.eval(x))).collect())
}

fn zip_xy(xs: &[f64], ys: &[f64]) -> Vec<(f64, f64)> {
    xs.iter().copied().zip(ys.iter().copied()).collect()
}

fn zip_band(xs: &[f64], lower: &[f64], upper: &[f64]) -> Vec<(f64, f64, f64)> {
    xs.iter()
        .zip(lower.iter().zip(upper))
        .map(|(&x, (&lo, &hi))| (x, lo, hi))
        .collect()
}
