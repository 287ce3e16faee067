// File: crates/chart-core/src/theme.rs
// Summary: Figure styles (background, grid, axis and text colors) selected once per figure.

use skia_safe as skia;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub plot_background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub title: skia::Color,
    pub legend_background: skia::Color,
    pub show_grid: bool,
    pub title_size: f32,
    pub label_size: f32,
}

#[derive(Debug, Error)]
#[error("unknown style '{0}' (expected one of: fast, fivethirtyeight, dark, light)")]
pub struct UnknownTheme(pub String);

impl Theme {
    /// Plain white plot, no grid.
    pub fn fast() -> Self {
        Self {
            name: "fast",
            background: skia::Color::from_argb(255, 255, 255, 255),
            plot_background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 176, 176, 176),
            axis_line: skia::Color::from_argb(255, 0, 0, 0),
            axis_label: skia::Color::from_argb(255, 0, 0, 0),
            tick: skia::Color::from_argb(255, 40, 40, 40),
            title: skia::Color::from_argb(255, 0, 0, 0),
            legend_background: skia::Color::from_argb(204, 255, 255, 255),
            show_grid: false,
            title_size: 28.0,
            label_size: 15.0,
        }
    }

    /// Light grey canvas with a prominent grid.
    pub fn fivethirtyeight() -> Self {
        Self {
            name: "fivethirtyeight",
            background: skia::Color::from_argb(255, 0xf0, 0xf0, 0xf0),
            plot_background: skia::Color::from_argb(255, 0xf0, 0xf0, 0xf0),
            grid: skia::Color::from_argb(255, 0xcb, 0xcb, 0xcb),
            axis_line: skia::Color::from_argb(255, 0xf0, 0xf0, 0xf0),
            axis_label: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            tick: skia::Color::from_argb(255, 0x44, 0x44, 0x44),
            title: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            legend_background: skia::Color::from_argb(220, 0xf0, 0xf0, 0xf0),
            show_grid: true,
            title_size: 34.0,
            label_size: 16.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            plot_background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            title: skia::Color::from_argb(255, 235, 235, 245),
            legend_background: skia::Color::from_argb(200, 30, 30, 34),
            show_grid: true,
            title_size: 28.0,
            label_size: 15.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            plot_background: skia::Color::from_argb(255, 255, 255, 255),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            title: skia::Color::from_argb(255, 20, 20, 30),
            legend_background: skia::Color::from_argb(210, 250, 250, 252),
            show_grid: true,
            title_size: 28.0,
            label_size: 15.0,
        }
    }

    /// Look a preset up by name (case-insensitive).
    pub fn find(name: &str) -> Result<Self, UnknownTheme> {
        presets()
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| UnknownTheme(name.to_string()))
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::fast() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::fast(), Theme::fivethirtyeight(), Theme::dark(), Theme::light()]
}
