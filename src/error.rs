//! Error types for upstream providers, the scan pipeline and configuration

use std::time::Duration;
use thiserror::Error;

/// Upstream data fault. Always recoverable by skipping the instrument or metric.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed payload from {url}: {reason}")]
    Malformed { url: String, reason: String },
    #[error("no data for {0}")]
    Empty(String),
}

impl ProviderError {
    pub fn malformed(url: impl Into<String>, reason: impl ToString) -> Self {
        ProviderError::Malformed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Transport errors and server-side statuses are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::Request { .. } => true,
            ProviderError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Per-instrument failure collected by the scanner.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("{symbol}: {source}")]
    Provider {
        symbol: String,
        #[source]
        source: ProviderError,
    },
    #[error("{symbol}: evaluation timed out after {after:?}")]
    Timeout { symbol: String, after: Duration },
    #[error("{symbol}: evaluation aborted: {reason}")]
    Aborted { symbol: String, reason: String },
}

impl ScanError {
    pub fn symbol(&self) -> &str {
        match self {
            ScanError::Provider { symbol, .. }
            | ScanError::Timeout { symbol, .. }
            | ScanError::Aborted { symbol, .. } => symbol,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
