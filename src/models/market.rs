use serde::{Deserialize, Serialize};
use std::fmt;

/// Bar granularity. The scan runs on daily bars only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Day1,
}

impl Interval {
    pub fn seconds(&self) -> i64 {
        match self {
            Interval::Day1 => 86_400,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Interval::Day1 => "1d",
        };
        f.write_str(label)
    }
}

/// A tradable contract in the scan universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub symbol: String,
    pub quote_coin: String,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, quote_coin: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            quote_coin: quote_coin.into(),
        }
    }

    pub fn is_quoted_in(&self, currency: &str) -> bool {
        self.quote_coin.eq_ignore_ascii_case(currency)
    }
}
