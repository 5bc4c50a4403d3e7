//! Yahoo Finance chart API client
//!
//! The multi-year history endpoint does not scrape the brokerage site; it
//! pulls daily OHLCV bars from Yahoo's chart API. Symbols get the `.TW` or
//! `.TWO` suffix depending on the resolved company's listing venue.

use chrono::DateTime;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::constants;
use crate::error::{AppError, Result};
use crate::models::DailyBar;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

pub struct YahooClient {
    client: reqwest::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(constants::YAHOO_CHART_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch the 5-year daily series for a suffixed symbol (e.g. `2330.TW`).
    /// Days where Yahoo reports null fields (halts, partial bars) are
    /// skipped.
    pub async fn fetch_daily_history(&self, symbol: &str) -> Result<Vec<DailyBar>> {
        let url = format!(
            "{}/{}?range={}&interval=1d",
            self.base_url,
            symbol,
            constants::YAHOO_HISTORY_RANGE
        );
        debug!(url, "Fetching Yahoo chart data");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, constants::USER_AGENT)
            .send()
            .await?
            .error_for_status()?;
        let body: ChartResponse = response.json().await?;

        if let Some(error) = body.chart.error {
            if !error.is_null() {
                return Err(AppError::Network(format!("Yahoo chart error: {}", error)));
            }
        }
        let result = body
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| AppError::NotFound(format!("no chart data for {}", symbol)))?;

        let timestamps = result.timestamp.unwrap_or_default();
        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Parse("chart response missing quote block".to_string()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let (open, high, low, close, volume) = match (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            ) {
                (Some(o), Some(h), Some(l), Some(c), Some(v)) => (o, h, l, c, v),
                _ => continue,
            };
            let date = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| AppError::Parse(format!("bad chart timestamp {}", ts)))?
                .format("%Y-%m-%d")
                .to_string();
            bars.push(DailyBar {
                date,
                open,
                high,
                low,
                close,
                volume,
            });
        }
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_response_deserializes_and_skips_null_days() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1716163200, 1716249600, 1716336000],
                    "indicators": {
                        "quote": [{
                            "open":   [840.0, null, 852.0],
                            "high":   [856.0, null, 860.0],
                            "low":    [838.0, null, 848.0],
                            "close":  [855.0, null, 858.0],
                            "volume": [31200000, null, 28400000]
                        }]
                    }
                }],
                "error": null
            }
        }"#;
        let parsed: ChartResponse = serde_json::from_str(body).unwrap();
        let result = &parsed.chart.result.as_ref().unwrap()[0];
        assert_eq!(result.timestamp.as_ref().unwrap().len(), 3);

        let quote = &result.indicators.quote[0];
        assert_eq!(quote.open[1], None);
        assert_eq!(quote.close[2], Some(858.0));
    }
}
