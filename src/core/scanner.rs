//! Scan orchestrator: evaluates every instrument of the universe on a
//! bounded pool and folds the outcomes into a report.

use std::sync::Arc;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::ScanConfig;
use crate::error::{ProviderError, ScanError};
use crate::metrics::Metrics;
use crate::models::market::Instrument;
use crate::models::regime::MarketRegime;
use crate::models::report::{ScanReport, SkipTally};
use crate::models::signal::{DisqualificationReason, SignalDirection, SignalRecord};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::{Screening, SignalEngine};

/// What happened to one instrument.
#[derive(Debug)]
pub enum InstrumentOutcome {
    Signal(SignalRecord),
    Disqualified(DisqualificationReason),
    /// Passed the filters without matching a direction.
    NoSignal,
    Fault(ScanError),
}

pub struct Scanner {
    provider: Arc<dyn MarketDataProvider>,
    engine: Arc<SignalEngine>,
    config: ScanConfig,
    metrics: Option<Arc<Metrics>>,
}

impl Scanner {
    pub fn new(provider: Arc<dyn MarketDataProvider>, config: ScanConfig) -> Self {
        let engine = Arc::new(SignalEngine::new(config.classifier.clone()));
        Self {
            provider,
            engine,
            config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Evaluate every instrument quoted in the configured settlement currency.
    ///
    /// Results keep discovery order. One instrument's failure or timeout is
    /// recorded as a fault and never affects the others.
    pub async fn scan(&self, universe: &[Instrument], regime: MarketRegime) -> ScanReport {
        let symbols: Vec<String> = universe
            .iter()
            .filter(|i| i.is_quoted_in(&self.config.quote_currency))
            .map(|i| i.symbol.clone())
            .collect();

        info!(
            universe = universe.len(),
            eligible = symbols.len(),
            quote = %self.config.quote_currency,
            concurrency = self.config.concurrency,
            "Scanner: starting scan"
        );

        let outcomes: Vec<(String, InstrumentOutcome)> = stream::iter(symbols)
            .map(|symbol| {
                let evaluation = self.spawn_evaluation(symbol.clone());
                async move { (symbol, evaluation.await) }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let mut acc = ScanAccumulator::new(self.config.max_signals_per_direction);
        for (symbol, outcome) in outcomes {
            self.observe(&symbol, &outcome);
            acc.push(outcome);
        }

        let report = acc.finish(regime);
        info!(
            scanned = report.scanned,
            longs = report.qualified_longs,
            shorts = report.qualified_shorts,
            skipped = report.skipped.total(),
            faults = report.faults,
            "Scanner: scan complete"
        );
        report
    }

    /// Fetch, classify and annotate one instrument on its own task, bounded
    /// by the per-instrument timeout.
    fn spawn_evaluation(&self, symbol: String) -> impl std::future::Future<Output = InstrumentOutcome> {
        let provider = self.provider.clone();
        let engine = self.engine.clone();
        let metrics = self.metrics.clone();
        let interval = self.config.interval;
        let limit = self.config.history_limit;
        let deadline = self.config.instrument_timeout;

        async move {
            if let Some(m) = &metrics {
                m.instruments_in_flight.inc();
            }

            let task_symbol = symbol.clone();
            let handle = tokio::spawn(async move {
                timeout(
                    deadline,
                    evaluate_instrument(provider.as_ref(), &engine, &task_symbol, interval, limit),
                )
                .await
            });

            let outcome = match handle.await {
                Ok(Ok(Ok(outcome))) => outcome,
                Ok(Ok(Err(source))) => InstrumentOutcome::Fault(ScanError::Provider {
                    symbol: symbol.clone(),
                    source,
                }),
                Ok(Err(_elapsed)) => InstrumentOutcome::Fault(ScanError::Timeout {
                    symbol: symbol.clone(),
                    after: deadline,
                }),
                Err(join_error) => InstrumentOutcome::Fault(ScanError::Aborted {
                    symbol: symbol.clone(),
                    reason: join_error.to_string(),
                }),
            };

            if let Some(m) = &metrics {
                m.instruments_in_flight.dec();
            }
            outcome
        }
    }

    fn observe(&self, symbol: &str, outcome: &InstrumentOutcome) {
        match outcome {
            InstrumentOutcome::Signal(record) => {
                info!(symbol = %symbol, direction = %record.direction(), "Scanner: {}", record.summary());
                if let Some(m) = &self.metrics {
                    m.record_signal(record.direction());
                }
            }
            InstrumentOutcome::Disqualified(reason) => {
                debug!(symbol = %symbol, reason = %reason, "Scanner: disqualified");
                if let Some(m) = &self.metrics {
                    m.record_disqualified(*reason);
                }
            }
            InstrumentOutcome::NoSignal => {
                debug!(symbol = %symbol, "Scanner: no directional match");
            }
            InstrumentOutcome::Fault(error) => {
                warn!(symbol = %symbol, error = %error, "Scanner: instrument failed");
                if let Some(m) = &self.metrics {
                    m.instrument_faults_total.inc();
                }
            }
        }
    }
}

/// Fetch history, screen it, and look up funding only for actual signals.
pub async fn evaluate_instrument(
    provider: &dyn MarketDataProvider,
    engine: &SignalEngine,
    symbol: &str,
    interval: crate::models::market::Interval,
    limit: usize,
) -> Result<InstrumentOutcome, ProviderError> {
    let candles = provider.get_candles(symbol, interval, limit).await?;

    let outcome = match engine.screen(symbol, &candles) {
        Screening::Candidate(candidate) => {
            let funding = match provider.get_funding_rate(symbol).await {
                Ok(rate) => rate,
                Err(e) => {
                    debug!(symbol = %symbol, error = %e, "Funding rate unavailable");
                    None
                }
            };
            InstrumentOutcome::Signal(candidate.into_record(funding))
        }
        Screening::Disqualified(reason) => InstrumentOutcome::Disqualified(reason),
        Screening::NoSignal => InstrumentOutcome::NoSignal,
    };
    Ok(outcome)
}

struct ScanAccumulator {
    cap: usize,
    longs: Vec<SignalRecord>,
    shorts: Vec<SignalRecord>,
    qualified_longs: usize,
    qualified_shorts: usize,
    skipped: SkipTally,
    faults: usize,
    scanned: usize,
}

impl ScanAccumulator {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            longs: Vec::new(),
            shorts: Vec::new(),
            qualified_longs: 0,
            qualified_shorts: 0,
            skipped: SkipTally::default(),
            faults: 0,
            scanned: 0,
        }
    }

    fn push(&mut self, outcome: InstrumentOutcome) {
        self.scanned += 1;
        match outcome {
            InstrumentOutcome::Signal(record) => {
                let (list, count) = match record.direction() {
                    SignalDirection::Long => (&mut self.longs, &mut self.qualified_longs),
                    SignalDirection::Short => (&mut self.shorts, &mut self.qualified_shorts),
                };
                *count += 1;
                if list.len() < self.cap {
                    list.push(record);
                }
            }
            InstrumentOutcome::Disqualified(reason) => self.skipped.record(reason),
            InstrumentOutcome::NoSignal => {}
            InstrumentOutcome::Fault(_) => self.faults += 1,
        }
    }

    fn finish(self, regime: MarketRegime) -> ScanReport {
        ScanReport {
            generated_at: Utc::now(),
            regime,
            longs: self.longs,
            shorts: self.shorts,
            qualified_longs: self.qualified_longs,
            qualified_shorts: self.qualified_shorts,
            skipped: self.skipped,
            faults: self.faults,
            scanned: self.scanned,
        }
    }
}
