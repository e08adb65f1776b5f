//! One scan pass: universe discovery, regime summary, instrument scan and
//! report delivery.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::config::ScanConfig;
use crate::core::scanner::Scanner;
use crate::metrics::Metrics;
use crate::models::indicators::Candle;
use crate::models::regime::{MarketRegime, MarketStats};
use crate::models::report::ScanReport;
use crate::notify::NotificationSink;
use crate::regime::{summarize_regime, ReferenceSeries};
use crate::report::{render, render_universe_unavailable};
use crate::services::market_data::{
    MarketDataProvider, MarketStatsProvider, ReferenceDataProvider,
};

/// How a pass ended.
#[derive(Debug)]
pub enum RunOutcome {
    Completed(ScanReport),
    /// The instrument list could not be fetched or was empty.
    UniverseUnavailable,
}

pub struct ScanRuntime {
    market: Arc<dyn MarketDataProvider>,
    reference: Arc<dyn ReferenceDataProvider>,
    stats: Arc<dyn MarketStatsProvider>,
    sink: Box<dyn NotificationSink>,
    scanner: Scanner,
    metrics: Option<Arc<Metrics>>,
}

impl ScanRuntime {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        reference: Arc<dyn ReferenceDataProvider>,
        stats: Arc<dyn MarketStatsProvider>,
        sink: Box<dyn NotificationSink>,
        config: ScanConfig,
    ) -> Self {
        let scanner = Scanner::new(market.clone(), config);
        Self {
            market,
            reference,
            stats,
            sink,
            scanner,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.scanner = self.scanner.with_metrics(metrics.clone());
        self.metrics = Some(metrics);
        self
    }

    fn config(&self) -> &ScanConfig {
        self.scanner.config()
    }

    /// Run a full pass and deliver the rendered report.
    pub async fn run_once(&self) -> RunOutcome {
        let started = Instant::now();
        info!(quote = %self.config().quote_currency, "ScanRuntime: starting pass");

        let (regime, universe) = tokio::join!(self.build_regime(), self.market.get_instruments());

        let universe = match universe {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                warn!("ScanRuntime: instrument list is empty, skipping scan");
                return self.universe_unavailable().await;
            }
            Err(e) => {
                warn!(error = %e, "ScanRuntime: failed to fetch instrument list, skipping scan");
                return self.universe_unavailable().await;
            }
        };

        let report = self.scanner.scan(&universe, regime).await;
        let elapsed = started.elapsed();
        if let Some(m) = &self.metrics {
            m.record_report(&report, elapsed.as_secs_f64());
        }

        self.sink.send(&render(&report)).await;
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            longs = report.longs.len(),
            shorts = report.shorts.len(),
            "ScanRuntime: pass complete"
        );
        RunOutcome::Completed(report)
    }

    /// Reference trend states plus the rotation narrative. Never fails:
    /// missing inputs degrade to NEUTRAL states or an unavailable narrative.
    pub async fn build_regime(&self) -> MarketRegime {
        let config = self.config();
        let (histories, global, btc_change) = tokio::join!(
            join_all(
                config
                    .reference_assets
                    .iter()
                    .map(|asset| self.reference_candles(&asset.symbol)),
            ),
            self.stats.get_global_market(),
            self.reference.get_price_change_pct(&config.btc_ticker_symbol),
        );

        let series: Vec<ReferenceSeries<'_>> = config
            .reference_assets
            .iter()
            .zip(histories.iter())
            .map(|(asset, candles)| ReferenceSeries::new(&asset.label, candles))
            .collect();

        let global = global
            .map_err(|e| warn!(error = %e, "Global market stats unavailable"))
            .ok();
        let btc_change = btc_change
            .map_err(|e| warn!(error = %e, "BTC 24h change unavailable"))
            .ok();

        let stats = MarketStats {
            total_market_cap_change_pct: global.map(|g| g.market_cap_change_pct_24h),
            btc_dominance_pct: global.map(|g| g.btc_dominance_pct),
            usdt_dominance_pct: global.map(|g| g.usdt_dominance_pct),
            btc_change_pct: btc_change,
        };

        summarize_regime(&series, Some(&stats))
    }

    async fn reference_candles(&self, symbol: &str) -> Vec<Candle> {
        let config = self.config();
        match self
            .reference
            .get_candles(symbol, config.interval, config.reference_history)
            .await
        {
            Ok(candles) => candles,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Reference history unavailable");
                Vec::new()
            }
        }
    }

    async fn universe_unavailable(&self) -> RunOutcome {
        if let Some(m) = &self.metrics {
            m.universe_unavailable_total.inc();
        }
        self.sink.send(&render_universe_unavailable()).await;
        RunOutcome::UniverseUnavailable
    }
}
