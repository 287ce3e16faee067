// File: crates/stoxx-core/src/lib.rs
// Summary: Daily price analysis: rolling volatility, polynomial trends, chart composition and data sources.

pub mod analysis;
pub mod compose;
pub mod config;
pub mod datenum;
pub mod error;
pub mod pipeline;
pub mod range;
pub mod sink;
pub mod source;
pub mod trend;
pub mod volatility;
pub mod window;

pub use analysis::Analysis;
pub use compose::ChartComposer;
pub use config::{AnalysisConfig, AppConfig, ConfigError, SourceKind};
pub use error::AnalysisError;
pub use pipeline::{render_outcomes, AnalysisRequest, ChartKey, ChartOutcome, Pipeline, RenderReport, ViewKind};
pub use range::DateRange;
pub use sink::{PngDirSink, RenderSink};
pub use source::{BarSource, CsvSource, FetchError, MemorySource, YahooSource};
pub use trend::{TrendCurve, TrendFitter};
pub use volatility::{VolatilityBand, VolatilityEstimator};
pub use window::{Bar, SeriesWindow};
