//! JSON-over-HTTP client shared by the REST providers

use std::time::Duration;

use backon::{ConstantBuilder, Retryable};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::error::{ConfigError, ProviderError};

#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    attempts: usize,
    retry_delay: Duration,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &HttpConfig) -> Self {
        Self {
            client,
            attempts: config.attempts.max(1),
            retry_delay: config.retry_delay,
        }
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.client
    }

    /// GET `url` and decode the JSON body, retrying transient failures.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        let backoff = ConstantBuilder::default()
            .with_delay(self.retry_delay)
            .with_max_times(self.attempts - 1);

        (|| self.get_once::<T>(url, query))
            .retry(backoff)
            .when(ProviderError::is_transient)
            .notify(|err, delay| {
                warn!(url = %url, error = %err, ?delay, "HTTP request failed, retrying");
            })
            .await
    }

    async fn get_once<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T, ProviderError>
    where
        T: DeserializeOwned,
    {
        debug!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ProviderError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ProviderError::Request {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|e| ProviderError::malformed(url, e))
    }
}
