// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings).

/// Default surface width in pixels.
pub const WIDTH: i32 = 2000;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 1000;
/// Vertical gap between stacked panels, in pixels.
pub const PANEL_GAP: i32 = 24;
/// Height reserved above the panels when a figure title is drawn.
pub const TITLE_BAND: u32 = 56;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(96, 32, 24, 64)
    }
}
