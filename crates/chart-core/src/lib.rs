// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports public API for figure construction and rendering.

pub mod chart;
pub mod series;
pub mod axis;
pub mod datenum;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod view;
pub mod theme;
pub mod text;

pub use chart::{Chart, Figure, Panel, RenderOptions};
pub use series::{LineDash, Series, SeriesType, Style};
pub use axis::{Axis, ScaleKind};
pub use view::ViewState;
pub use theme::{Theme, UnknownTheme};
pub use text::TextShaper;
pub use skia_safe::Color;
