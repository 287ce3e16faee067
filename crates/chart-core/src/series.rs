// File: crates/chart-core/src/series.rs
// Summary: Series model for lines, filled bands, step fills, horizontal rules and point markers.
// Notes:
// - Non-finite y values are treated as gaps; renderers split paths there instead of
//   drawing through them, so partially undefined indicator output can be passed as-is.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeriesType {
    Line,
    Band,      // filled region between (lower, upper) per x
    StepFill,  // step ("pre") area from baseline up to y
    HLine,     // horizontal rule from x0 to x1 at y
    Marker,    // filled circle at a single point
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineDash {
    Solid,
    DashDot,
}

/// Visual encoding for one series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub color: skia::Color,
    pub width: f32,
    pub dash: LineDash,
    /// Circle radius in pixels (markers only).
    pub radius: f32,
}

impl Style {
    pub fn stroke(color: skia::Color, width: f32) -> Self {
        Self { color, width, dash: LineDash::Solid, radius: 0.0 }
    }

    /// Fill-only style; `alpha` in [0, 1] is folded into the color.
    pub fn fill(color: skia::Color, alpha: f32) -> Self {
        Self { color: with_alpha(color, alpha), width: 0.0, dash: LineDash::Solid, radius: 0.0 }
    }

    pub fn marker(color: skia::Color, radius: f32) -> Self {
        Self { color, width: 0.0, dash: LineDash::Solid, radius }
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.color = with_alpha(self.color, alpha);
        self
    }

    pub fn dashed(mut self, dash: LineDash) -> Self {
        self.dash = dash;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::stroke(skia::Color::from_argb(255, 64, 160, 255), 2.0)
    }
}

/// Replace the alpha channel of `c` with `alpha` (clamped to [0, 1]).
pub fn with_alpha(c: skia::Color, alpha: f32) -> skia::Color {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    skia::Color::from_argb(a, c.r(), c.g(), c.b())
}

#[derive(Clone, Debug)]
pub struct Series {
    pub series_type: SeriesType,
    pub data_xy: Vec<(f64, f64)>,          // used by Line/StepFill/HLine/Marker
    pub data_band: Vec<(f64, f64, f64)>,   // used by Band: (x, lower, upper)
    pub baseline: Option<f64>,             // used by StepFill (origin)
    pub style: Style,
    pub label: Option<String>,
}

impl Series {
    pub fn new(series_type: SeriesType) -> Self {
        Self {
            series_type,
            data_xy: Vec::new(),
            data_band: Vec::new(),
            baseline: None,
            style: Style::default(),
            label: None,
        }
    }

    pub fn with_data(series_type: SeriesType, data: Vec<(f64, f64)>) -> Self {
        Self { data_xy: data, ..Self::new(series_type) }
    }

    pub fn line(data: Vec<(f64, f64)>) -> Self {
        Self::with_data(SeriesType::Line, data)
    }

    pub fn band(data: Vec<(f64, f64, f64)>) -> Self {
        Self { data_band: data, ..Self::new(SeriesType::Band) }
    }

    pub fn step_fill(data: Vec<(f64, f64)>, baseline: f64) -> Self {
        Self::with_data(SeriesType::StepFill, data).with_baseline(baseline)
    }

    pub fn hline(y: f64, x0: f64, x1: f64) -> Self {
        Self::with_data(SeriesType::HLine, vec![(x0, y), (x1, y)])
    }

    pub fn marker(x: f64, y: f64) -> Self {
        Self::with_data(SeriesType::Marker, vec![(x, y)])
    }

    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get baseline value or default (0.0) when not set.
    pub fn baseline_value(&self) -> f64 { self.baseline.unwrap_or(0.0) }
}

/// Split XY data into maximal runs of finite points.
pub fn finite_runs(data: &[(f64, f64)]) -> Vec<&[(f64, f64)]> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &(x, y)) in data.iter().enumerate() {
        let ok = x.is_finite() && y.is_finite();
        match (ok, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(&data[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start { runs.push(&data[s..]); }
    runs
}

/// Split band data into maximal runs where x, lower and upper are all finite.
pub fn finite_band_runs(data: &[(f64, f64, f64)]) -> Vec<&[(f64, f64, f64)]> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &(x, lo, hi)) in data.iter().enumerate() {
        let ok = x.is_finite() && lo.is_finite() && hi.is_finite();
        match (ok, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(&data[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start { runs.push(&data[s..]); }
    runs
}
