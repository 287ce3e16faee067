// File: crates/stoxx-cli/src/main.rs
// Summary: Fetches daily bars for each symbol and writes simple or trend/volatility charts as PNGs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chart_core::RenderOptions;
use chrono::NaiveDate;
use clap::Parser;
use stoxx_core::{
    render_outcomes, AnalysisRequest, AppConfig, BarSource, CsvSource, Pipeline, PngDirSink, SourceKind,
    ViewKind, YahooSource,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "stoxx.toml";

#[derive(Parser, Debug)]
#[command(version, about = "Daily price charts with rolling volatility and polynomial trends")]
struct Cli {
    /// TOML config file (default: ./stoxx.toml if present)
    #[arg(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Symbols to chart, in order (replaces the configured list)
    #[arg(value_name = "SYMBOL")]
    symbols: Vec<String>,

    /// Last day = today minus this many days (0..=730)
    #[arg(long)]
    end_days_back: Option<u32>,

    /// First day = last day minus this many days (93..=1825)
    #[arg(long)]
    span_days: Option<u32>,

    /// Explicit first day (YYYY-MM-DD); needs --end
    #[arg(long, requires = "end")]
    begin: Option<NaiveDate>,

    /// Explicit last day (YYYY-MM-DD); needs --begin
    #[arg(long, requires = "begin")]
    end: Option<NaiveDate>,

    /// simple | analytical
    #[arg(long)]
    view: Option<ViewKind>,

    /// fast | fivethirtyeight | dark | light
    #[arg(long)]
    style: Option<String>,

    /// yahoo | csv
    #[arg(long)]
    source: Option<SourceKind>,

    /// Directory of <SYMBOL>.csv files for --source csv
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output directory for PNGs
    #[arg(long, short, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Rolling window in trading days
    #[arg(long)]
    window: Option<usize>,

    /// Band half-width in standard deviations
    #[arg(long)]
    n_std: Option<f64>,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;
    cfg.validate().context("invalid configuration")?;

    let today = chrono::Local::now().date_naive();
    let range = cfg.date_range(today)?;
    let theme = cfg.theme()?;
    info!(%today, begin = %range.begin, end = %range.end, view = %cfg.view, style = theme.name, "starting");

    let source = build_source(&cfg)?;
    let pipeline = Pipeline::new(source, cfg.analysis.clone(), theme);
    let request = AnalysisRequest { symbols: cfg.symbols(), range, view: cfg.view };
    let outcomes = pipeline.run(&request);

    let opts = RenderOptions { width: cfg.width, height: cfg.height, ..RenderOptions::default() };
    let mut sink = PngDirSink::new(&cfg.output_dir, opts);
    let report = render_outcomes(&outcomes, &mut sink);

    for path in &report.written {
        println!("Wrote {path}");
    }
    for (key, err) in &report.failed {
        warn!(symbol = key.symbol.as_str(), %err, "not written");
    }
    let skipped = outcomes.iter().filter(|o| o.result.is_err()).count();
    if skipped > 0 {
        println!("Skipped {skipped} of {} symbol(s); see log for details", outcomes.len());
    }
    if report.written.is_empty() {
        anyhow::bail!("no charts written");
    }
    Ok(())
}

/// File (explicit, or ./stoxx.toml when present) overlaid with command-line flags.
fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut cfg = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => {
            AppConfig::load(DEFAULT_CONFIG).with_context(|| format!("loading {DEFAULT_CONFIG}"))?
        }
        None => AppConfig::default(),
    };

    if !cli.symbols.is_empty() {
        cfg.symbols = cli.symbols.clone();
    }
    if let Some(v) = cli.end_days_back { cfg.end_days_back = v; }
    if let Some(v) = cli.span_days { cfg.span_days = v; }
    if cli.begin.is_some() || cli.end.is_some() {
        cfg.begin = cli.begin;
        cfg.end = cli.end;
    }
    if let Some(v) = cli.view { cfg.view = v; }
    if let Some(v) = &cli.style { cfg.style = Some(v.clone()); }
    if let Some(v) = cli.source { cfg.source = v; }
    if let Some(v) = &cli.data_dir { cfg.data_dir = v.clone(); }
    if let Some(v) = &cli.out { cfg.output_dir = v.clone(); }
    if let Some(v) = cli.window { cfg.analysis.window_size = v; }
    if let Some(v) = cli.n_std { cfg.analysis.n_std = v; }
    if let Some(v) = cli.width { cfg.width = v; }
    if let Some(v) = cli.height { cfg.height = v; }
    Ok(cfg)
}

fn build_source(cfg: &AppConfig) -> Result<Box<dyn BarSource>> {
    Ok(match cfg.source {
        SourceKind::Yahoo => Box::new(
            YahooSource::new(Duration::from_secs(cfg.timeout_secs)).context("building HTTP client")?,
        ),
        SourceKind::Csv => Box::new(CsvSource::new(&cfg.data_dir)),
    })
}
