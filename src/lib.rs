//! Daily trend screener for perpetual-contract markets.
//!
//! The engine computes a fixed indicator set per instrument, runs an ordered
//! filter chain to classify each one as LONG, SHORT or excluded, and merges
//! the result with a market-regime summary into a single report.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod regime;
pub mod report;
pub mod services;
pub mod signals;

pub use error::{ConfigError, ProviderError, ScanError};
