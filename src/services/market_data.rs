//! Collaborator interfaces for upstream market data.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::indicators::Candle;
use crate::models::market::{Instrument, Interval};

/// Venue serving the scanned contracts.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Tradable instruments with their quote currency.
    async fn get_instruments(&self) -> Result<Vec<Instrument>, ProviderError>;

    /// Up to `limit` most recent bars, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;

    /// Current funding rate, `None` when the venue has none for the symbol.
    async fn get_funding_rate(&self, symbol: &str) -> Result<Option<f64>, ProviderError>;
}

/// Venue serving reference-asset history for the regime summary.
#[async_trait]
pub trait ReferenceDataProvider: Send + Sync {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;

    /// 24h price change in percent.
    async fn get_price_change_pct(&self, symbol: &str) -> Result<f64, ProviderError>;
}

/// Aggregate market statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalMarket {
    pub market_cap_change_pct_24h: f64,
    pub btc_dominance_pct: f64,
    pub usdt_dominance_pct: f64,
}

#[async_trait]
pub trait MarketStatsProvider: Send + Sync {
    async fn get_global_market(&self) -> Result<GlobalMarket, ProviderError>;
}
