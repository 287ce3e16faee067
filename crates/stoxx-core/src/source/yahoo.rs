// File: crates/stoxx-core/src/source/yahoo.rs
// Summary: Daily bars from the Yahoo Finance v8 chart endpoint (blocking HTTP, JSON).

use std::time::Duration;

use chrono::{DateTime, Duration as Days, NaiveDate, NaiveTime};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

use super::{into_window, BarSource, FetchError};
use crate::window::{Bar, SeriesWindow};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const USER_AGENT: &str = concat!("stoxx/", env!("CARGO_PKG_VERSION"));

pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).timeout(timeout).build()?;
        Ok(Self { client, base_url: BASE_URL.to_string() })
    }

    /// Point at another host serving the same API (mirrors, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn epoch_secs(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }
}

impl BarSource for YahooSource {
    fn name(&self) -> &str { "yahoo" }

    fn fetch_daily_bars(
        &self,
        symbol: &str,
        begin: NaiveDate,
        end: NaiveDate,
    ) -> Result<SeriesWindow, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), symbol);
        // period2 is exclusive; ask for the whole end day.
        let query = [
            ("period1", Self::epoch_secs(begin).to_string()),
            ("period2", Self::epoch_secs(end + Days::days(1)).to_string()),
            ("interval", "1d".to_string()),
            ("events", "history".to_string()),
        ];
        debug!(symbol, %begin, %end, "requesting daily bars");
        let response = self.client.get(&url).query(&query).send()?;
        let status = response.status();
        let body = response.text()?;

        // Error payloads arrive with 4xx statuses but still as chart JSON.
        match parse_chart_json(symbol, &body) {
            Ok(bars) => into_window(symbol, begin, end, bars),
            Err(err @ (FetchError::UnknownSymbol(_) | FetchError::Api(_))) => Err(err),
            Err(_) if !status.is_success() => Err(FetchError::Api(format!("HTTP {status}"))),
            Err(err) => Err(err),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Decode a chart API response body into bars (unsorted, unfiltered).
///
/// Null fields become NaN; rows with no price at all are dropped. Dates are the
/// exchange-local calendar day of each timestamp.
pub fn parse_chart_json(symbol: &str, body: &str) -> Result<Vec<Bar>, FetchError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    if let Some(err) = envelope.chart.error {
        return Err(if err.code.eq_ignore_ascii_case("Not Found") {
            FetchError::UnknownSymbol(symbol.to_string())
        } else {
            FetchError::Api(match err.description {
                Some(d) => format!("{}: {}", err.code, d),
                None => err.code,
            })
        });
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let at = |v: &[Option<f64>], i: usize| v.get(i).copied().flatten().unwrap_or(f64::NAN);

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(dt) = DateTime::from_timestamp(ts + result.meta.gmtoffset, 0) else {
            return Err(FetchError::Malformed(format!("timestamp {ts} out of range")));
        };
        let bar = Bar {
            date: dt.date_naive(),
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            volume: at(&quote.volume, i),
        };
        if [bar.open, bar.high, bar.low, bar.close].iter().all(|v| v.is_nan()) {
            continue;
        }
        bars.push(bar);
    }
    Ok(bars)
}
