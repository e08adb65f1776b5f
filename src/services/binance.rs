//! Binance spot REST provider for reference-asset data

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ProviderError;
use crate::models::indicators::Candle;
use crate::models::market::Interval;
use crate::services::http::HttpClient;
use crate::services::market_data::ReferenceDataProvider;

/// Hard cap the klines endpoint accepts per request.
const MAX_KLINES: usize = 1000;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ticker24h {
    price_change_percent: String,
}

pub struct BinanceSpotProvider {
    http: HttpClient,
    base_url: String,
}

impl BinanceSpotProvider {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn interval_code(interval: Interval) -> &'static str {
        match interval {
            Interval::Day1 => "1d",
        }
    }

    /// Parse a kline row: `[openTime, open, high, low, close, volume, closeTime, quoteVolume, ...]`.
    fn parse_row(url: &str, row: &[Value]) -> Result<Candle, ProviderError> {
        if row.len() < 6 {
            return Err(ProviderError::malformed(url, "kline row too short"));
        }
        let field = |i: usize| -> Result<f64, ProviderError> {
            number(&row[i]).ok_or_else(|| ProviderError::malformed(url, format!("bad kline field {}", i)))
        };

        let open_time = row[0]
            .as_i64()
            .ok_or_else(|| ProviderError::malformed(url, "bad kline open time"))?;
        let timestamp = DateTime::from_timestamp_millis(open_time)
            .ok_or_else(|| ProviderError::malformed(url, "kline open time out of range"))?;

        let mut candle = Candle::new(field(1)?, field(2)?, field(3)?, field(4)?, field(5)?, timestamp);
        if let Some(turnover) = row.get(7).and_then(number) {
            candle = candle.with_turnover(turnover);
        }
        Ok(candle)
    }
}

/// Binance encodes decimals as strings; accept plain numbers too.
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[async_trait]
impl ReferenceDataProvider for BinanceSpotProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}/api/v3/klines", self.base_url);
        let query = [
            ("symbol", symbol.to_string()),
            ("interval", Self::interval_code(interval).to_string()),
            ("limit", limit.min(MAX_KLINES).to_string()),
        ];
        let rows: Vec<Vec<Value>> = self.http.get_json(&url, &query).await?;
        if rows.is_empty() {
            return Err(ProviderError::Empty(symbol.to_string()));
        }

        rows.iter().map(|row| Self::parse_row(&url, row)).collect()
    }

    async fn get_price_change_pct(&self, symbol: &str) -> Result<f64, ProviderError> {
        let url = format!("{}/api/v3/ticker/24hr", self.base_url);
        let ticker: Ticker24h = self
            .http
            .get_json(&url, &[("symbol", symbol.to_string())])
            .await?;
        ticker
            .price_change_percent
            .parse()
            .map_err(|e| ProviderError::malformed(&url, e))
    }
}
