//! Prometheus metrics for scan runs

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::models::report::ScanReport;
use crate::models::signal::{DisqualificationReason, SignalDirection};

pub struct Metrics {
    registry: Registry,
    pub scans_total: IntCounter,
    pub universe_unavailable_total: IntCounter,
    pub instruments_scanned_total: IntCounter,
    pub signals_total: IntCounterVec,
    pub disqualified_total: IntCounterVec,
    pub instrument_faults_total: IntCounter,
    pub instruments_in_flight: IntGauge,
    pub scan_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let scans_total = IntCounter::new("scans_total", "Completed scan passes")?;
        let universe_unavailable_total = IntCounter::new(
            "universe_unavailable_total",
            "Scans aborted because the instrument list could not be fetched",
        )?;
        let instruments_scanned_total =
            IntCounter::new("instruments_scanned_total", "Instruments evaluated")?;
        let signals_total = IntCounterVec::new(
            Opts::new("signals_total", "Signals produced by direction"),
            &["direction"],
        )?;
        let disqualified_total = IntCounterVec::new(
            Opts::new("disqualified_total", "Instruments disqualified by reason"),
            &["reason"],
        )?;
        let instrument_faults_total = IntCounter::new(
            "instrument_faults_total",
            "Instruments whose fetch or evaluation failed or timed out",
        )?;
        let instruments_in_flight = IntGauge::new(
            "instruments_in_flight",
            "Instruments currently being fetched or evaluated",
        )?;
        let scan_duration_seconds = Histogram::with_opts(
            HistogramOpts::new("scan_duration_seconds", "Wall time of a scan pass")
                .buckets(vec![1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0]),
        )?;

        registry.register(Box::new(scans_total.clone()))?;
        registry.register(Box::new(universe_unavailable_total.clone()))?;
        registry.register(Box::new(instruments_scanned_total.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(disqualified_total.clone()))?;
        registry.register(Box::new(instrument_faults_total.clone()))?;
        registry.register(Box::new(instruments_in_flight.clone()))?;
        registry.register(Box::new(scan_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            scans_total,
            universe_unavailable_total,
            instruments_scanned_total,
            signals_total,
            disqualified_total,
            instrument_faults_total,
            instruments_in_flight,
            scan_duration_seconds,
        })
    }

    pub fn record_signal(&self, direction: SignalDirection) {
        self.signals_total
            .with_label_values(&[direction.as_str()])
            .inc();
    }

    pub fn record_disqualified(&self, reason: DisqualificationReason) {
        self.disqualified_total
            .with_label_values(&[reason.as_str()])
            .inc();
    }

    /// Fold a finished report into the scan-level counters.
    pub fn record_report(&self, report: &ScanReport, elapsed_secs: f64) {
        self.scans_total.inc();
        self.instruments_scanned_total.inc_by(report.scanned as u64);
        self.scan_duration_seconds.observe(elapsed_secs);
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
