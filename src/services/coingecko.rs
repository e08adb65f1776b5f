//! CoinGecko aggregate market statistics

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::error::ProviderError;
use crate::services::http::HttpClient;
use crate::services::market_data::{GlobalMarket, MarketStatsProvider};

#[derive(Debug, Deserialize)]
struct GlobalResponse {
    data: GlobalData,
}

#[derive(Debug, Deserialize)]
struct GlobalData {
    market_cap_change_percentage_24h_usd: Option<f64>,
    #[serde(default)]
    market_cap_percentage: HashMap<String, f64>,
}

pub struct CoinGeckoProvider {
    http: HttpClient,
    base_url: String,
}

impl CoinGeckoProvider {
    pub fn new(http: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MarketStatsProvider for CoinGeckoProvider {
    async fn get_global_market(&self) -> Result<GlobalMarket, ProviderError> {
        let url = format!("{}/api/v3/global", self.base_url);
        let response: GlobalResponse = self.http.get_json(&url, &[]).await?;
        let data = response.data;

        let missing = |field: &str| ProviderError::malformed(&url, format!("missing {}", field));
        Ok(GlobalMarket {
            market_cap_change_pct_24h: data
                .market_cap_change_percentage_24h_usd
                .ok_or_else(|| missing("market_cap_change_percentage_24h_usd"))?,
            btc_dominance_pct: *data
                .market_cap_percentage
                .get("btc")
                .ok_or_else(|| missing("market_cap_percentage.btc"))?,
            usdt_dominance_pct: *data
                .market_cap_percentage
                .get("usdt")
                .ok_or_else(|| missing("market_cap_percentage.usdt"))?,
        })
    }
}
