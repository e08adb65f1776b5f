//! Runtime configuration.
//!
//! Built once at startup from environment variables (after `.env` is loaded)
//! and passed by reference. Library code never reads the environment itself.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::models::market::Interval;
use crate::signals::ClassifierParams;

pub const DEFAULT_MEXC_URL: &str = "https://contract.mexc.com";
pub const DEFAULT_BINANCE_URL: &str = "https://api.binance.com";
pub const DEFAULT_COINGECKO_URL: &str = "https://api.coingecko.com";
pub const DEFAULT_TELEGRAM_URL: &str = "https://api.telegram.org";

/// Upper bound on signals listed per direction; larger settings are clamped.
pub const MAX_SIGNALS_PER_DIRECTION: usize = 25;

/// Deployment environment name, used to pick the log format.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub timeout: Duration,
    /// Total attempts per request, first one included.
    pub attempts: usize,
    pub retry_delay: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderUrls {
    pub mexc: String,
    pub binance: String,
    pub coingecko: String,
}

impl Default for ProviderUrls {
    fn default() -> Self {
        Self {
            mexc: DEFAULT_MEXC_URL.to_string(),
            binance: DEFAULT_BINANCE_URL.to_string(),
            coingecko: DEFAULT_COINGECKO_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelegramConfig {
    pub api_url: String,
    pub token: String,
    pub chat_id: String,
}

/// A reference asset used by the regime summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceAsset {
    pub label: String,
    pub symbol: String,
}

impl ReferenceAsset {
    pub fn new(label: &str, symbol: &str) -> Self {
        Self {
            label: label.to_string(),
            symbol: symbol.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Settlement currency the universe is filtered to.
    pub quote_currency: String,
    pub interval: Interval,
    pub history_limit: usize,
    pub reference_assets: Vec<ReferenceAsset>,
    pub reference_history: usize,
    /// Spot symbol whose 24h change feeds the rotation narrative.
    pub btc_ticker_symbol: String,
    /// Instruments evaluated concurrently.
    pub concurrency: usize,
    pub instrument_timeout: Duration,
    pub max_signals_per_direction: usize,
    pub classifier: ClassifierParams,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            quote_currency: "USDT".to_string(),
            interval: Interval::Day1,
            history_limit: 400,
            reference_assets: vec![
                ReferenceAsset::new("BTC", "BTCUSDT"),
                ReferenceAsset::new("ETH", "ETHUSDT"),
            ],
            reference_history: 300,
            btc_ticker_symbol: "BTCUSDT".to_string(),
            concurrency: 4,
            instrument_timeout: Duration::from_secs(30),
            max_signals_per_direction: MAX_SIGNALS_PER_DIRECTION,
            classifier: ClassifierParams::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub http: HttpConfig,
    pub providers: ProviderUrls,
    /// `None` when the token or chat id is missing; reports then go to stdout.
    pub telegram: Option<TelegramConfig>,
    pub scan: ScanConfig,
    pub metrics_textfile: Option<PathBuf>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "HTTP_TIMEOUT_SECS",
                http_defaults.timeout.as_secs(),
            )?),
            attempts: parse_or(&lookup, "HTTP_RETRIES", http_defaults.attempts)?.max(1),
            retry_delay: http_defaults.retry_delay,
        };

        let providers = ProviderUrls {
            mexc: lookup("MEXC_API_URL").unwrap_or_else(|| DEFAULT_MEXC_URL.to_string()),
            binance: lookup("BINANCE_API_URL").unwrap_or_else(|| DEFAULT_BINANCE_URL.to_string()),
            coingecko: lookup("COINGECKO_API_URL")
                .unwrap_or_else(|| DEFAULT_COINGECKO_URL.to_string()),
        };

        let telegram = match (non_empty(&lookup, "TELEGRAM_TOKEN"), non_empty(&lookup, "CHAT_ID")) {
            (Some(token), Some(chat_id)) => Some(TelegramConfig {
                api_url: lookup("TELEGRAM_API_URL")
                    .unwrap_or_else(|| DEFAULT_TELEGRAM_URL.to_string()),
                token,
                chat_id,
            }),
            _ => None,
        };

        let defaults = ScanConfig::default();
        let mut classifier = defaults.classifier.clone();
        classifier.min_turnover = parse_or(&lookup, "SCAN_MIN_TURNOVER", classifier.min_turnover)?;

        let scan = ScanConfig {
            quote_currency: non_empty(&lookup, "SCAN_QUOTE_CURRENCY")
                .unwrap_or(defaults.quote_currency),
            concurrency: parse_or(&lookup, "SCAN_CONCURRENCY", defaults.concurrency)?.max(1),
            instrument_timeout: Duration::from_secs(parse_or(
                &lookup,
                "SCAN_INSTRUMENT_TIMEOUT_SECS",
                defaults.instrument_timeout.as_secs(),
            )?),
            max_signals_per_direction: parse_or(
                &lookup,
                "SCAN_MAX_SIGNALS",
                defaults.max_signals_per_direction,
            )?
            .min(MAX_SIGNALS_PER_DIRECTION),
            classifier,
            ..defaults
        };

        Ok(Self {
            http,
            providers,
            telegram,
            scan,
            metrics_textfile: non_empty(&lookup, "METRICS_TEXTFILE").map(PathBuf::from),
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match non_empty(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
