#![allow(dead_code)]

use std::time::Duration;

use chrono::{TimeZone, Utc};
use trendscan::config::HttpConfig;
use trendscan::models::indicators::Candle;
use trendscan::services::HttpClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Client with a short retry delay so retry tests stay fast.
pub fn http_client() -> HttpClient {
    HttpClient::new(&HttpConfig {
        timeout: Duration::from_secs(5),
        attempts: 3,
        retry_delay: Duration::from_millis(10),
    })
    .expect("http client")
}

pub async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// 150 bars rising 1% a day, liquid, with a 3x volume spike on the last bar.
pub fn rising_with_spike() -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let count = 150;
    (0..count)
        .map(|i| {
            let close = 100.0 * 1.01f64.powi(i as i32);
            let open = if i == 0 { close } else { close / 1.01 };
            let volume = if i == count - 1 { 3_000.0 } else { 1_000.0 };
            Candle::new(
                open,
                close * 1.005,
                close * 0.995,
                close,
                volume,
                start + chrono::Duration::days(i as i64),
            )
            .with_turnover(10_000_000.0)
        })
        .collect()
}
