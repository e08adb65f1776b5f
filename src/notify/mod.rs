//! Report delivery. Sinks never fail the caller: delivery errors are logged
//! and the text falls back to stdout.

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::config::TelegramConfig;

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, text: &str);
}

/// Prints the report to stdout.
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn send(&self, text: &str) {
        println!("{}", text);
    }
}

/// Posts Markdown messages through the Telegram Bot API.
pub struct TelegramSink {
    client: reqwest::Client,
    config: TelegramConfig,
}

impl TelegramSink {
    pub fn new(client: reqwest::Client, config: TelegramConfig) -> Self {
        Self { client, config }
    }

    async fn deliver(&self, text: &str) -> Result<(), String> {
        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_url.trim_end_matches('/'),
            self.config.token
        );
        let payload = json!({
            "chat_id": self.config.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(format!("status {}", response.status()))
        }
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn send(&self, text: &str) {
        match self.deliver(text).await {
            Ok(()) => info!(chat_id = %self.config.chat_id, "Report delivered"),
            Err(e) => {
                warn!(error = %e, "Report delivery failed, printing locally");
                StdoutSink.send(text).await;
            }
        }
    }
}

/// Telegram when configured, stdout otherwise.
pub fn sink_from_config(
    client: reqwest::Client,
    telegram: Option<&TelegramConfig>,
) -> Box<dyn NotificationSink> {
    match telegram {
        Some(config) => Box::new(TelegramSink::new(client, config.clone())),
        None => {
            info!("Telegram not configured, reports will be printed to stdout");
            Box::new(StdoutSink)
        }
    }
}
