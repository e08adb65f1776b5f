//! MEXC contract REST payloads

use serde::Deserialize;

/// Common envelope: `{"success": true, "code": 0, "data": ...}`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub code: i64,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetail {
    pub symbol: String,
    #[serde(default)]
    pub quote_coin: Option<String>,
}

/// Column-oriented kline payload; every vector has one entry per bar.
#[derive(Debug, Deserialize)]
pub struct KlineData {
    pub time: Vec<i64>,
    pub open: Vec<f64>,
    pub close: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub vol: Vec<f64>,
    #[serde(default)]
    pub amount: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRateData {
    pub funding_rate: Option<f64>,
}
