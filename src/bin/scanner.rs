//! Trendscan Scanner
//!
//! Runs one daily scan pass and delivers the report to Telegram, or stdout
//! when no chat is configured. Meant to be triggered by an external scheduler.

use std::sync::Arc;

use dotenvy::dotenv;
use tracing::{info, warn};
use trendscan::config::Config;
use trendscan::core::runtime::{RunOutcome, ScanRuntime};
use trendscan::logging;
use trendscan::metrics::Metrics;
use trendscan::notify::sink_from_config;
use trendscan::services::{BinanceSpotProvider, CoinGeckoProvider, HttpClient, MexcMarketDataProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let env = trendscan::config::get_environment();
    info!("Starting Trendscan Scanner");
    info!(environment = %env, "Environment");

    let config = Config::from_env()?;
    let metrics = Arc::new(Metrics::new()?);
    let http = HttpClient::new(&config.http)?;

    let market = Arc::new(MexcMarketDataProvider::new(http.clone(), &config.providers.mexc));
    let reference = Arc::new(BinanceSpotProvider::new(http.clone(), &config.providers.binance));
    let stats = Arc::new(CoinGeckoProvider::new(http.clone(), &config.providers.coingecko));
    let sink = sink_from_config(http.inner().clone(), config.telegram.as_ref());

    let runtime = ScanRuntime::new(market, reference, stats, sink, config.scan.clone())
        .with_metrics(metrics.clone());

    match runtime.run_once().await {
        RunOutcome::Completed(report) => info!(
            scanned = report.scanned,
            longs = report.qualified_longs,
            shorts = report.qualified_shorts,
            "Scan finished"
        ),
        RunOutcome::UniverseUnavailable => warn!("Scan skipped: instrument list unavailable"),
    }

    if let Some(path) = &config.metrics_textfile {
        match metrics.export() {
            Ok(text) => {
                if let Err(e) = tokio::fs::write(path, text).await {
                    warn!(path = %path.display(), error = %e, "Failed to write metrics textfile");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode metrics"),
        }
    }

    Ok(())
}
