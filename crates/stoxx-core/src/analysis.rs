// File: crates/stoxx-core/src/analysis.rs
// Summary: Volatility band and trend curves for one SeriesWindow, computed together.

use tracing::debug;

use crate::config::AnalysisConfig;
use crate::trend::{TrendCurve, TrendFitter, TREND_DEGREES};
use crate::volatility::{VolatilityBand, VolatilityEstimator};
use crate::window::SeriesWindow;

/// Overlays for the analytical view. A `None` trend (or an all-undefined band)
/// means that layer cannot be drawn for this window and is left out.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub band: VolatilityBand,
    pub linear: Option<TrendCurve>,
    pub cubic: Option<TrendCurve>,
}

impl Analysis {
    pub fn compute(window: &SeriesWindow, config: &AnalysisConfig) -> Self {
        let closes = window.closes();
        let xs = window.date_nums();

        let band = VolatilityEstimator::new(config.window_size).estimate(&closes);
        if band.is_undefined() {
            debug!(
                symbol = window.symbol(),
                len = closes.len(),
                window = config.window_size,
                "volatility band omitted"
            );
        }

        // Only degrees listed in the config are fitted.
        let fit = |degree: usize| {
            if !config.trend_degrees.contains(&degree) {
                return None;
            }
            match TrendFitter::new(degree).fit(&xs, &closes) {
                Ok(curve) => Some(curve),
                Err(err) => {
                    debug!(symbol = window.symbol(), degree, %err, "trend omitted");
                    None
                }
            }
        };

        Self { band, linear: fit(TREND_DEGREES[0]), cubic: fit(TREND_DEGREES[1]) }
    }
}
