//! MEXC perpetual contracts

pub mod messages;
pub mod provider;

pub use provider::MexcMarketDataProvider;
