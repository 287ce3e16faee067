// File: crates/stoxx-core/src/source/memory.rs
// Summary: In-memory bar source for tests and offline runs.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::{into_window, BarSource, FetchError};
use crate::window::Bar;

/// Unknown symbols yield an empty window, like a provider with no rows in range.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    bars: HashMap<String, Vec<Bar>>,
    failures: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self { Self::default() }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.insert(symbol, bars);
        self
    }

    /// Make every fetch of `symbol` fail with `FetchError::Api(message)`.
    pub fn with_failure(mut self, symbol: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures.insert(symbol.into(), message.into());
        self
    }

    pub fn insert(&mut self, symbol: impl Into<String>, bars: Vec<Bar>) {
        self.bars.insert(symbol.into(), bars);
    }
}

impl BarSource for MemorySource {
    fn name(&self) -> &str { "memory" }

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<crate::window::SeriesWindow, FetchError> {
        if let Some(msg) = self.failures.get(symbol) {
            return Err(FetchError::Api(msg.clone()));
        }
        let bars = self.bars.get(symbol).cloned().unwrap_or_default();
        into_window(symbol, begin, end, bars)
    }
}
