// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and panel layout.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RectI32 {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI32 {
    pub const fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }
    pub const fn from_ltwh(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }
    pub const fn width(&self) -> i32 { self.right - self.left }
    pub const fn height(&self) -> i32 { self.bottom - self.top }
}

/// Split `rect` into vertically stacked rows whose heights follow `ratios`,
/// separated by `gap` pixels. Zero ratios are treated as 1.
/// The last row absorbs rounding so rows always tile the rect exactly.
pub fn split_vertical(rect: RectI32, ratios: &[u32], gap: i32) -> Vec<RectI32> {
    if ratios.is_empty() { return Vec::new(); }
    let gaps = gap.max(0) * (ratios.len() as i32 - 1);
    let avail = (rect.height() - gaps).max(0);
    let total: u32 = ratios.iter().map(|r| (*r).max(1)).sum();

    let mut out = Vec::with_capacity(ratios.len());
    let mut top = rect.top;
    for (i, r) in ratios.iter().enumerate() {
        let h = if i + 1 == ratios.len() {
            (rect.bottom - top).max(0)
        } else {
            (avail as i64 * (*r).max(1) as i64 / total as i64) as i32
        };
        out.push(RectI32::from_ltrb(rect.left, top, rect.right, top + h));
        top += h + gap.max(0);
    }
    out
}
