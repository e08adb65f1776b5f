//! Upstream data providers

pub mod binance;
pub mod coingecko;
pub mod http;
pub mod market_data;
pub mod mexc;

pub use binance::BinanceSpotProvider;
pub use coingecko::CoinGeckoProvider;
pub use http::HttpClient;
pub use market_data::{
    GlobalMarket, MarketDataProvider, MarketStatsProvider, ReferenceDataProvider,
};
pub use mexc::MexcMarketDataProvider;
