//! CoinGecko global stats against a mocked REST API

use serde_json::json;
use trendscan::error::ProviderError;
use trendscan::services::{CoinGeckoProvider, MarketStatsProvider};
use wiremock::MockServer;

use crate::test_utils::{http_client, mount_json};

#[tokio::test]
async fn global_market_is_read() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/v3/global",
        json!({
            "data": {
                "active_cryptocurrencies": 14000,
                "market_cap_percentage": {"btc": 54.2, "eth": 16.8, "usdt": 4.1},
                "market_cap_change_percentage_24h_usd": 1.75
            }
        }),
    )
    .await;

    let provider = CoinGeckoProvider::new(http_client(), server.uri());
    let global = provider.get_global_market().await.unwrap();
    assert_eq!(global.market_cap_change_pct_24h, 1.75);
    assert_eq!(global.btc_dominance_pct, 54.2);
    assert_eq!(global.usdt_dominance_pct, 4.1);
}

#[tokio::test]
async fn missing_dominance_is_malformed() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/v3/global",
        json!({
            "data": {
                "market_cap_percentage": {"btc": 54.2},
                "market_cap_change_percentage_24h_usd": 1.75
            }
        }),
    )
    .await;

    let provider = CoinGeckoProvider::new(http_client(), server.uri());
    let err = provider.get_global_market().await.unwrap_err();
    assert!(matches!(err, ProviderError::Malformed { .. }));
}
