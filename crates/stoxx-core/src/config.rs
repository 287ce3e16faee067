// File: crates/stoxx-core/src/config.rs
// Summary: TOML-backed run configuration and the analysis parameters consumed by the core.
//
// Every field has a default, so an empty file (or no file) is a valid configuration.
// Unknown keys are rejected to catch typos early.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chart_core::{Theme, UnknownTheme};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::ViewKind;
use crate::range::DateRange;
use crate::trend::TREND_DEGREES;
use crate::volatility::DEFAULT_WINDOW;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error(transparent)]
    Style(#[from] UnknownTheme),
}

/// Parameters of the volatility band and trend overlays.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Rolling window length in trading days.
    pub window_size: usize,
    /// Band half-width in standard deviations.
    pub n_std: f64,
    /// Always `[1, 3]`; accepted in the file only if it says exactly that.
    pub trend_degrees: Vec<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { window_size: DEFAULT_WINDOW, n_std: 2.0, trend_degrees: TREND_DEGREES.to_vec() }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size < 2 {
            return Err(invalid("analysis.window_size", format!("{} is below 2", self.window_size)));
        }
        if !self.n_std.is_finite() || self.n_std <= 0.0 {
            return Err(invalid("analysis.n_std", format!("{} must be a positive number", self.n_std)));
        }
        if self.trend_degrees != TREND_DEGREES {
            return Err(invalid("analysis.trend_degrees", format!("{:?} is fixed at {:?}", self.trend_degrees, TREND_DEGREES)));
        }
        Ok(())
    }
}

/// Where bars come from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Yahoo,
    Csv,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(SourceKind::Yahoo),
            "csv" => Ok(SourceKind::Csv),
            other => Err(invalid("source", format!("unknown source '{other}' (expected yahoo or csv)"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub symbols: Vec<String>,
    /// Days between today and the last requested day.
    pub end_days_back: u32,
    /// Days between the first and last requested day.
    pub span_days: u32,
    /// Explicit range; when both are set they win over the offsets.
    pub begin: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub view: ViewKind,
    /// Theme name; defaults per view (simple: fast, analytical: fivethirtyeight).
    pub style: Option<String>,
    pub width: i32,
    pub height: i32,
    pub output_dir: PathBuf,
    pub source: SourceKind,
    /// Directory of `<SYMBOL>.csv` files for the csv source.
    pub data_dir: PathBuf,
    pub timeout_secs: u64,
    pub analysis: AnalysisConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["AAPL".into(), "TUI1.DE".into()],
            end_days_back: 0,
            span_days: 365,
            begin: None,
            end: None,
            view: ViewKind::Analytical,
            style: None,
            width: chart_core::types::WIDTH,
            height: chart_core::types::HEIGHT,
            output_dir: PathBuf::from("target/out"),
            source: SourceKind::Yahoo,
            data_dir: PathBuf::from("data"),
            timeout_secs: 30,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.iter().all(|s| s.trim().is_empty()) {
            return Err(invalid("symbols", "at least one symbol is required".into()));
        }
        if self.width < 200 || self.height < 150 {
            return Err(invalid("size", format!("{}x{} is too small", self.width, self.height)));
        }
        if self.timeout_secs == 0 {
            return Err(invalid("timeout_secs", "must be positive".into()));
        }
        if self.begin.is_some() != self.end.is_some() {
            return Err(invalid("range", "begin and end must be given together".into()));
        }
        self.theme()?;
        self.analysis.validate()
    }

    pub fn theme(&self) -> Result<Theme, ConfigError> {
        match &self.style {
            Some(name) => Ok(Theme::find(name)?),
            None => Ok(match self.view {
                ViewKind::Simple => Theme::fast(),
                ViewKind::Analytical => Theme::fivethirtyeight(),
            }),
        }
    }

    pub fn date_range(&self, today: NaiveDate) -> Result<DateRange, ConfigError> {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) => DateRange::new(begin, end),
            _ => DateRange::from_offsets(today, self.end_days_back, self.span_days),
        }
    }

    /// Trimmed, non-empty symbols in file order.
    pub fn symbols(&self) -> Vec<String> {
        self.symbols
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid { field: field.to_string(), reason }
}
