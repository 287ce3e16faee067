// File: crates/chart-core/src/chart.rs
// Summary: Chart (one panel) and Figure (stacked panels + title) with headless rendering on Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;

use crate::axis::Axis;
use crate::geometry::{split_vertical, RectI32};
use crate::grid::nice_ticks;
use crate::series::{finite_band_runs, finite_runs, LineDash, Series, SeriesType, Style};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{Insets, HEIGHT, PANEL_GAP, TITLE_BAND, WIDTH};
use crate::view::ViewState;

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    /// Titles, tick labels and legends. Off in pixel-exact tests (font variance).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            draw_labels: true,
        }
    }
}

/// One set of axes and the series drawn on them.
#[derive(Clone, Debug)]
pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend: bool,
    pub grid: bool,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            legend: false,
            grid: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Fit both axes to the finite data, padding Y by `margin` (fraction of span).
    pub fn autoscale_axes(&mut self, margin: f64) {
        ViewState::from_chart(self, margin).apply_to_chart(self);
    }

    /// Labels of series that appear in the legend, in draw order.
    pub fn legend_labels(&self) -> Vec<&str> {
        self.series.iter().filter_map(|s| s.label.as_deref()).collect()
    }

    pub fn series_of(&self, kind: SeriesType) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(move |s| s.series_type == kind)
    }
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

#[derive(Clone, Debug)]
pub struct Panel {
    pub chart: Chart,
    pub height_ratio: u32,
}

/// Vertically stacked panels sharing one title and one theme.
#[derive(Clone, Debug)]
pub struct Figure {
    pub title: Option<String>,
    pub panels: Vec<Panel>,
    pub share_x: bool,
    pub theme: Theme,
}

impl Figure {
    pub fn new(theme: Theme) -> Self {
        Self { title: None, panels: Vec::new(), share_x: false, theme }
    }

    pub fn single(chart: Chart, theme: Theme) -> Self {
        let mut fig = Self::new(theme);
        fig.add_panel(chart, 1);
        fig
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn add_panel(&mut self, chart: Chart, height_ratio: u32) {
        self.panels.push(Panel { chart, height_ratio });
    }

    /// Union of the panels' x ranges.
    pub fn shared_x_range(&self) -> Option<(f64, f64)> {
        let mut it = self.panels.iter().map(|p| (p.chart.x_axis.min, p.chart.x_axis.max));
        let first = it.next()?;
        Some(it.fold(first, |(lo, hi), (a, b)| (lo.min(a), hi.max(b))))
    }

    /// Give every panel the same x range and mark the figure as x-shared.
    pub fn link_x_axes(&mut self) {
        if let Some((lo, hi)) = self.shared_x_range() {
            for p in &mut self.panels {
                p.chart.x_axis.min = lo;
                p.chart.x_axis.max = hi;
            }
        }
        self.share_x = true;
    }

    /// Pixel rectangles of each panel's plot area for the given options.
    pub fn panel_rects(&self, opts: &RenderOptions) -> Vec<RectI32> {
        let title_band = if self.title.is_some() { TITLE_BAND as i32 } else { 0 };
        let area = RectI32::from_ltrb(
            opts.insets.left as i32,
            opts.insets.top as i32 + title_band,
            opts.width - opts.insets.right as i32,
            opts.height - opts.insets.bottom as i32,
        );
        let ratios: Vec<u32> = self.panels.iter().map(|p| p.height_ratio).collect();
        // Unshared panels each need room for their own x tick labels.
        let gap = if self.share_x { PANEL_GAP } else { PANEL_GAP + opts.insets.bottom as i32 };
        split_vertical(area, &ratios, gap)
    }

    /// Render the figure to a PNG at `output_png_path` using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a tightly packed RGBA8 buffer: (pixels, width, height, row stride).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        self.draw(surface.canvas(), opts);

        let info = skia::ImageInfo::new(
            (opts.width, opts.height),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = opts.width as usize * 4;
        let mut pixels = vec![0u8; stride * opts.height as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("reading back pixels failed");
        }
        Ok((pixels, opts.width as u32, opts.height as u32, stride))
    }

    fn draw(&self, canvas: &skia::Canvas, opts: &RenderOptions) {
        let theme = &self.theme;
        canvas.clear(theme.background);

        let shaper = opts.draw_labels.then(TextShaper::new);
        let rects = self.panel_rects(opts);
        let last = self.panels.len().saturating_sub(1);

        for (i, (panel, rect)) in self.panels.iter().zip(rects.iter()).enumerate() {
            let show_x_labels = !self.share_x || i == last;
            draw_panel(canvas, *rect, &panel.chart, theme, shaper.as_ref(), show_x_labels);
        }

        if let (Some(title), Some(shaper)) = (&self.title, shaper.as_ref()) {
            let cx = opts.width as f32 * 0.5;
            let y = opts.insets.top as f32 + TITLE_BAND as f32 * 0.6;
            shaper.draw_centered(canvas, title, cx, y, theme.title_size, theme.title, true);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

/// Maps data coordinates into one panel's plot rectangle.
struct PlotArea<'a> {
    rect: RectI32,
    x: &'a Axis,
    y: &'a Axis,
}

impl PlotArea<'_> {
    fn sx(&self, x: f64) -> f32 {
        self.rect.left as f32 + ((x - self.x.min) / self.x.span()) as f32 * self.rect.width() as f32
    }
    fn sy(&self, y: f64) -> f32 {
        self.rect.bottom as f32 - ((y - self.y.min) / self.y.span()) as f32 * self.rect.height() as f32
    }
    fn skia_rect(&self) -> skia::Rect {
        skia::Rect::from_ltrb(
            self.rect.left as f32,
            self.rect.top as f32,
            self.rect.right as f32,
            self.rect.bottom as f32,
        )
    }
}

fn draw_panel(
    canvas: &skia::Canvas,
    rect: RectI32,
    chart: &Chart,
    theme: &Theme,
    shaper: Option<&TextShaper>,
    show_x_labels: bool,
) {
    let area = PlotArea { rect, x: &chart.x_axis, y: &chart.y_axis };

    let mut bg = skia::Paint::default();
    bg.set_color(theme.plot_background);
    canvas.draw_rect(area.skia_rect(), &bg);

    let x_ticks = nice_ticks(chart.x_axis.min, chart.x_axis.max, 8);
    let y_ticks = nice_ticks(chart.y_axis.min, chart.y_axis.max, 5);

    if theme.show_grid && chart.grid {
        draw_grid(canvas, &area, &x_ticks, &y_ticks, theme.grid);
    }

    canvas.save();
    canvas.clip_rect(area.skia_rect(), skia::ClipOp::Intersect, true);
    for s in &chart.series {
        match s.series_type {
            SeriesType::Line => draw_line_series(canvas, &area, s),
            SeriesType::Band => draw_band_series(canvas, &area, s),
            SeriesType::StepFill => draw_step_fill_series(canvas, &area, s),
            SeriesType::HLine => draw_hline_series(canvas, &area, s),
            SeriesType::Marker => draw_marker_series(canvas, &area, s),
        }
    }
    canvas.restore();

    draw_axes(canvas, &area, theme);

    if let Some(shaper) = shaper {
        draw_tick_labels(canvas, shaper, &area, &x_ticks, &y_ticks, theme, show_x_labels);
        if chart.legend {
            draw_legend(canvas, shaper, &area, chart, theme);
        }
    }
}

fn draw_grid(canvas: &skia::Canvas, area: &PlotArea, x_ticks: &[f64], y_ticks: &[f64], color: skia::Color) {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);

    let r = area.rect;
    for &x in x_ticks {
        let px = area.sx(x);
        canvas.draw_line((px, r.top as f32), (px, r.bottom as f32), &paint);
    }
    for &y in y_ticks {
        let py = area.sy(y);
        canvas.draw_line((r.left as f32, py), (r.right as f32, py), &paint);
    }
}

fn draw_axes(canvas: &skia::Canvas, area: &PlotArea, theme: &Theme) {
    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);

    let r = area.rect;
    let (l, t, rr, b) = (r.left as f32, r.top as f32, r.right as f32, r.bottom as f32);
    canvas.draw_line((l, b), (rr, b), &axis_paint);
    canvas.draw_line((l, t), (l, b), &axis_paint);
}

fn draw_tick_labels(
    canvas: &skia::Canvas,
    shaper: &TextShaper,
    area: &PlotArea,
    x_ticks: &[f64],
    y_ticks: &[f64],
    theme: &Theme,
    show_x_labels: bool,
) {
    let size = theme.label_size;
    let r = area.rect;
    for &y in y_ticks {
        let label = area.y.format_tick(y);
        shaper.draw_right(canvas, &label, r.left as f32 - 8.0, area.sy(y) + size * 0.35, size, theme.tick);
    }
    if show_x_labels {
        for &x in x_ticks {
            let label = area.x.format_tick(x);
            shaper.draw_centered(canvas, &label, area.sx(x), r.bottom as f32 + size + 8.0, size, theme.tick, false);
        }
    }
    if !area.y.label.is_empty() {
        shaper.draw_left(canvas, &area.y.label, r.left as f32 + 4.0, r.top as f32 - 6.0, size, theme.axis_label, false);
    }
}

fn draw_legend(canvas: &skia::Canvas, shaper: &TextShaper, area: &PlotArea, chart: &Chart, theme: &Theme) {
    let entries: Vec<&Series> = chart.series.iter().filter(|s| s.label.is_some()).collect();
    if entries.is_empty() {
        return;
    }
    let size = theme.label_size;
    let row_h = size * 1.5;
    let swatch_w = 32.0f32;
    let pad = 10.0f32;
    let text_w = entries
        .iter()
        .filter_map(|s| s.label.as_deref())
        .map(|l| shaper.measure_width(l, size, false))
        .fold(0.0f32, f32::max);

    let left = area.rect.left as f32 + 12.0;
    let top = area.rect.top as f32 + 12.0;
    let box_rect = skia::Rect::from_xywh(
        left,
        top,
        pad * 3.0 + swatch_w + text_w,
        pad * 2.0 + row_h * entries.len() as f32,
    );
    let mut bg = skia::Paint::default();
    bg.set_color(theme.legend_background);
    bg.set_anti_alias(true);
    canvas.draw_round_rect(box_rect, 4.0, 4.0, &bg);

    for (i, s) in entries.iter().enumerate() {
        let cy = top + pad + row_h * (i as f32 + 0.5);
        let x0 = left + pad;
        let x1 = x0 + swatch_w;
        match s.series_type {
            SeriesType::Line | SeriesType::HLine => {
                let mut p = stroke_paint(&s.style);
                p.set_stroke_width(s.style.width.clamp(1.0, 6.0));
                canvas.draw_line((x0, cy), (x1, cy), &p);
            }
            SeriesType::Band | SeriesType::StepFill => {
                let p = fill_paint(&s.style);
                canvas.draw_rect(skia::Rect::from_ltrb(x0, cy - size * 0.4, x1, cy + size * 0.4), &p);
            }
            SeriesType::Marker => {
                let p = fill_paint(&s.style);
                canvas.draw_circle(((x0 + x1) * 0.5, cy), size * 0.4, &p);
            }
        }
        if let Some(label) = &s.label {
            shaper.draw_left(canvas, label, x1 + pad, cy + size * 0.35, size, theme.axis_label, false);
        }
    }
}

fn stroke_paint(style: &Style) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(style.width.max(0.5));
    paint.set_color(style.color);
    if style.dash == LineDash::DashDot {
        let w = style.width.max(1.0);
        let intervals = [w * 6.0, w * 2.5, w, w * 2.5];
        paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    paint
}

fn fill_paint(style: &Style) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(style.color);
    paint
}

fn draw_line_series(canvas: &skia::Canvas, area: &PlotArea, series: &Series) {
    let stroke = stroke_paint(&series.style);
    for run in finite_runs(&series.data_xy) {
        if run.len() < 2 {
            continue;
        }
        let mut path = skia::Path::new();
        let (x0, y0) = run[0];
        path.move_to((area.sx(x0), area.sy(y0)));
        for &(x, y) in run.iter().skip(1) {
            path.line_to((area.sx(x), area.sy(y)));
        }
        canvas.draw_path(&path, &stroke);
    }
}

fn draw_band_series(canvas: &skia::Canvas, area: &PlotArea, series: &Series) {
    let fill = fill_paint(&series.style);
    for run in finite_band_runs(&series.data_band) {
        if run.len() < 2 {
            continue;
        }
        let mut path = skia::Path::new();
        let (x0, _, hi0) = run[0];
        path.move_to((area.sx(x0), area.sy(hi0)));
        for &(x, _, hi) in run.iter().skip(1) {
            path.line_to((area.sx(x), area.sy(hi)));
        }
        for &(x, lo, _) in run.iter().rev() {
            path.line_to((area.sx(x), area.sy(lo)));
        }
        path.close();
        canvas.draw_path(&path, &fill);
    }
}

/// Step "pre": the value at x[i] holds over (x[i-1], x[i]].
fn draw_step_fill_series(canvas: &skia::Canvas, area: &PlotArea, series: &Series) {
    let fill = fill_paint(&series.style);
    let base = area.sy(series.baseline_value());
    for run in finite_runs(&series.data_xy) {
        if run.len() < 2 {
            continue;
        }
        let mut path = skia::Path::new();
        let (x0, y0) = run[0];
        path.move_to((area.sx(x0), base));
        path.line_to((area.sx(x0), area.sy(y0)));
        for w in run.windows(2) {
            let (xp, _) = w[0];
            let (x, y) = w[1];
            path.line_to((area.sx(xp), area.sy(y)));
            path.line_to((area.sx(x), area.sy(y)));
        }
        let (xn, _) = run[run.len() - 1];
        path.line_to((area.sx(xn), base));
        path.close();
        canvas.draw_path(&path, &fill);
    }
}

fn draw_hline_series(canvas: &skia::Canvas, area: &PlotArea, series: &Series) {
    if let [a, b, ..] = series.data_xy.as_slice() {
        let ((x0, y0), (x1, y1)) = (*a, *b);
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) {
            return;
        }
        let stroke = stroke_paint(&series.style);
        canvas.draw_line((area.sx(x0), area.sy(y0)), (area.sx(x1), area.sy(y1)), &stroke);
    }
}

fn draw_marker_series(canvas: &skia::Canvas, area: &PlotArea, series: &Series) {
    let fill = fill_paint(&series.style);
    let radius = series.style.radius.max(1.0);
    for &(x, y) in &series.data_xy {
        if x.is_finite() && y.is_finite() {
            canvas.draw_circle((area.sx(x), area.sy(y)), radius, &fill);
        }
    }
}
