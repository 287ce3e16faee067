// File: crates/stoxx-core/src/pipeline.rs
// Summary: Sequential per-symbol run: fetch -> analyse -> compose, with rendering as a separate step.

use std::fmt;
use std::str::FromStr;

use chart_core::{Figure, Theme};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::Analysis;
use crate::compose::ChartComposer;
use crate::config::{AnalysisConfig, ConfigError};
use crate::error::{AnalysisError, FetchError};
use crate::range::DateRange;
use crate::sink::RenderSink;
use crate::source::BarSource;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// Open/close/high/low lines with price bands.
    Simple,
    /// Trend and volatility panel over a volume panel.
    #[default]
    Analytical,
}

impl ViewKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Simple => "simple",
            ViewKind::Analytical => "analytical",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ViewKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(ViewKind::Simple),
            "analytical" => Ok(ViewKind::Analytical),
            other => Err(ConfigError::Invalid {
                field: "view".into(),
                reason: format!("unknown view '{other}' (expected simple or analytical)"),
            }),
        }
    }
}

/// One run over several symbols sharing a range and a view.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    pub symbols: Vec<String>,
    pub range: DateRange,
    pub view: ViewKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChartKey {
    pub symbol: String,
    pub view: ViewKind,
    pub range: DateRange,
}

#[derive(Debug)]
pub struct ChartOutcome {
    pub key: ChartKey,
    pub result: Result<Figure, AnalysisError>,
}

pub struct Pipeline<S: BarSource> {
    source: S,
    analysis: AnalysisConfig,
    composer: ChartComposer,
}

impl<S: BarSource> Pipeline<S> {
    pub fn new(source: S, analysis: AnalysisConfig, theme: Theme) -> Self {
        let composer = ChartComposer::new(theme).with_n_std(analysis.n_std);
        Self { source, analysis, composer }
    }

    pub fn source(&self) -> &S { &self.source }

    /// Fetch one symbol and build its figure. Nothing is cached between calls.
    pub fn chart_symbol(&self, symbol: &str, range: DateRange, view: ViewKind) -> Result<Figure, AnalysisError> {
        let unavailable = || AnalysisError::DataUnavailable {
            symbol: symbol.to_string(),
            begin: range.begin,
            end: range.end,
        };
        let window = match self.source.fetch_daily_bars(symbol, range.begin, range.end) {
            Ok(window) => window,
            Err(FetchError::UnknownSymbol(_)) => return Err(unavailable()),
            Err(source) => return Err(AnalysisError::Fetch { symbol: symbol.to_string(), source }),
        };
        if window.is_empty() {
            return Err(unavailable());
        }
        info!(symbol, bars = window.len(), source = self.source.name(), "fetched");
        Ok(match view {
            ViewKind::Simple => self.composer.simple_view(&window),
            ViewKind::Analytical => {
                let analysis = Analysis::compute(&window, &self.analysis);
                self.composer.analytical_view(&window, &analysis)
            }
        })
    }

    /// One outcome per symbol, in request order. A failing symbol never stops the run.
    pub fn run(&self, request: &AnalysisRequest) -> Vec<ChartOutcome> {
        request
            .symbols
            .iter()
            .map(|symbol| {
                let result = self.chart_symbol(symbol, request.range, request.view);
                if let Err(err) = &result {
                    warn!(symbol = symbol.as_str(), %err, "skipping symbol");
                }
                ChartOutcome {
                    key: ChartKey { symbol: symbol.clone(), view: request.view, range: request.range },
                    result,
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    pub written: Vec<String>,
    pub failed: Vec<(ChartKey, String)>,
}

/// Hand every successful figure to `sink`; sink errors are collected, not fatal.
pub fn render_outcomes(outcomes: &[ChartOutcome], sink: &mut impl RenderSink) -> RenderReport {
    let mut report = RenderReport::default();
    for outcome in outcomes {
        let Ok(figure) = &outcome.result else { continue };
        match sink.render(&outcome.key, figure) {
            Ok(location) => report.written.push(location),
            Err(err) => {
                warn!(symbol = outcome.key.symbol.as_str(), error = %format!("{err:#}"), "render failed");
                report.failed.push((outcome.key.clone(), format!("{err:#}")));
            }
        }
    }
    report
}
