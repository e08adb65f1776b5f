//! MEXC perpetual-contract market data provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use super::messages::{ContractDetail, Envelope, FundingRateData, KlineData};
use crate::error::ProviderError;
use crate::models::indicators::Candle;
use crate::models::market::{Instrument, Interval};
use crate::services::http::HttpClient;
use crate::services::market_data::MarketDataProvider;

pub struct MexcMarketDataProvider {
    http: HttpClient,
    base_url: String,
}

impl MexcMarketDataProvider {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn interval_code(interval: Interval) -> &'static str {
        match interval {
            Interval::Day1 => "Day1",
        }
    }

    fn unwrap_envelope<T>(url: &str, envelope: Envelope<T>) -> Result<T, ProviderError> {
        if !envelope.success || envelope.code != 0 {
            return Err(ProviderError::malformed(
                url,
                format!("unsuccessful response (code {})", envelope.code),
            ));
        }
        envelope
            .data
            .ok_or_else(|| ProviderError::malformed(url, "missing data field"))
    }

    /// Turn the column-oriented payload into bars, oldest first.
    pub fn candles_from_klines(url: &str, data: KlineData) -> Result<Vec<Candle>, ProviderError> {
        let n = data.time.len();
        let columns = [
            data.open.len(),
            data.close.len(),
            data.high.len(),
            data.low.len(),
            data.vol.len(),
        ];
        if columns.iter().any(|&len| len != n) {
            return Err(ProviderError::malformed(url, "kline columns differ in length"));
        }
        let has_turnover = data.amount.len() == n;

        let mut candles = Vec::with_capacity(n);
        for i in 0..n {
            let timestamp = DateTime::from_timestamp(data.time[i], 0)
                .ok_or_else(|| ProviderError::malformed(url, format!("bad timestamp {}", data.time[i])))?;
            let mut candle = Candle::new(
                data.open[i],
                data.high[i],
                data.low[i],
                data.close[i],
                data.vol[i],
                timestamp,
            );
            if has_turnover {
                candle = candle.with_turnover(data.amount[i]);
            }
            candles.push(candle);
        }

        candles.sort_by_key(|c| c.timestamp);
        candles.dedup_by_key(|c| c.timestamp);
        Ok(candles)
    }
}

#[async_trait]
impl MarketDataProvider for MexcMarketDataProvider {
    async fn get_instruments(&self) -> Result<Vec<Instrument>, ProviderError> {
        let url = format!("{}/api/v1/contract/detail", self.base_url);
        let envelope: Envelope<Vec<ContractDetail>> = self.http.get_json(&url, &[]).await?;
        let contracts = Self::unwrap_envelope(&url, envelope)?;

        let instruments: Vec<Instrument> = contracts
            .into_iter()
            .filter_map(|c| c.quote_coin.map(|quote| Instrument::new(c.symbol, quote)))
            .collect();
        debug!(count = instruments.len(), "MEXC: loaded contract list");
        Ok(instruments)
    }

    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let url = format!("{}/api/v1/contract/kline/{}", self.base_url, symbol);
        let end = Utc::now().timestamp();
        let start = end - interval.seconds() * limit as i64;
        let query = [
            ("interval", Self::interval_code(interval).to_string()),
            ("start", start.to_string()),
            ("end", end.to_string()),
        ];

        let envelope: Envelope<KlineData> = self.http.get_json(&url, &query).await?;
        let data = Self::unwrap_envelope(&url, envelope)?;
        let mut candles = Self::candles_from_klines(&url, data)?;
        if candles.is_empty() {
            return Err(ProviderError::Empty(symbol.to_string()));
        }
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }

        debug!(symbol = %symbol, count = candles.len(), "MEXC: fetched candles");
        Ok(candles)
    }

    async fn get_funding_rate(&self, symbol: &str) -> Result<Option<f64>, ProviderError> {
        let url = format!("{}/api/v1/contract/funding_rate/{}", self.base_url, symbol);
        let envelope: Envelope<FundingRateData> = self.http.get_json(&url, &[]).await?;
        let data = Self::unwrap_envelope(&url, envelope)?;
        Ok(data.funding_rate)
    }
}
