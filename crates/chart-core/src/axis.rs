// File: crates/chart-core/src/axis.rs
// Summary: Axis model with labels, ranges and tick formatting (linear or calendar dates).

use crate::datenum::num_to_date;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    /// Values are days since 1970-01-01; ticks render as `YYYY-MM-DD`.
    Date,
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub kind: ScaleKind,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, kind: ScaleKind::Linear }
    }

    pub fn date(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { kind: ScaleKind::Date, ..Self::new(label, min, max) }
    }

    pub fn default_x() -> Self {
        Self::new("Time", 0.0, 10.0)
    }

    pub fn default_y() -> Self {
        Self::new("Price", 0.0, 100.0)
    }

    /// Range width, never below a tiny epsilon.
    pub fn span(&self) -> f64 { (self.max - self.min).max(1e-9) }

    /// Format a tick value for display.
    pub fn format_tick(&self, v: f64) -> String {
        match self.kind {
            ScaleKind::Date => day_number_to_string(v),
            ScaleKind::Linear => format_number(v),
        }
    }
}

fn day_number_to_string(v: f64) -> String {
    num_to_date(v).map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn format_number(v: f64) -> String {
    let a = v.abs();
    if a >= 1.0e9 {
        format!("{:.1}G", v / 1.0e9)
    } else if a >= 1.0e6 {
        format!("{:.1}M", v / 1.0e6)
    } else if a >= 1.0e4 {
        format!("{:.0}k", v / 1.0e3)
    } else if a >= 100.0 || v == v.trunc() {
        format!("{:.0}", v)
    } else {
        format!("{:.2}", v)
    }
}
