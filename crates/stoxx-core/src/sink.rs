// File: crates/stoxx-core/src/sink.rs
// Summary: Render sinks; the only place figures turn into bytes on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chart_core::{Figure, RenderOptions};
use tracing::info;

use crate::pipeline::ChartKey;
use crate::source::file_safe_symbol;

pub trait RenderSink {
    /// Render `figure` and return where it went (path, URL, ...).
    fn render(&mut self, key: &ChartKey, figure: &Figure) -> Result<String>;
}

/// Writes `<dir>/<symbol>_<view>_<begin>_<end>.png`.
pub struct PngDirSink {
    dir: PathBuf,
    opts: RenderOptions,
}

impl PngDirSink {
    pub fn new(dir: impl Into<PathBuf>, opts: RenderOptions) -> Self {
        Self { dir: dir.into(), opts }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn path_for(&self, key: &ChartKey) -> PathBuf {
        self.dir.join(format!(
            "{}_{}_{}_{}.png",
            file_safe_symbol(&key.symbol),
            key.view,
            key.range.begin.format("%Y-%m-%d"),
            key.range.end.format("%Y-%m-%d")
        ))
    }
}

impl RenderSink for PngDirSink {
    fn render(&mut self, key: &ChartKey, figure: &Figure) -> Result<String> {
        let path = self.path_for(key);
        figure
            .render_to_png(&self.opts, &path)
            .with_context(|| format!("rendering {} ({})", key.symbol, key.view))?;
        info!(path = %path.display(), "wrote chart");
        Ok(path.display().to_string())
    }
}
