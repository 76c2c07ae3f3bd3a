//! HTTP adapter fetching a JSON export of trade records.

use super::{records_from_value, EventSource, SourceError};
use async_trait::async_trait;
use backoff::future::retry;
use backoff::ExponentialBackoff;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// GETs a JSON array of trade records, retrying transient failures.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    url: String,
    max_elapsed: Duration,
}

impl HttpSource {
    pub fn new(url: String, max_elapsed: Duration) -> Self {
        Self {
            client: Client::new(),
            url,
            max_elapsed,
        }
    }

    async fn get_json(&self) -> Result<Value, SourceError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_elapsed),
            ..Default::default()
        };

        retry(backoff, || async {
            let response = self.client.get(&self.url).send().await.map_err(|e| {
                warn!(url = %self.url, error = %e, "Fetch failed, retrying");
                backoff::Error::transient(SourceError::Network(e.to_string()))
            })?;

            let status = response.status();
            if status == 429 {
                return Err(backoff::Error::transient(SourceError::RateLimited));
            }
            if status.is_server_error() {
                warn!(url = %self.url, status = status.as_u16(), "Server error, retrying");
                return Err(backoff::Error::transient(SourceError::HttpStatus(
                    status.as_u16(),
                )));
            }
            if !status.is_success() {
                return Err(backoff::Error::permanent(SourceError::HttpStatus(
                    status.as_u16(),
                )));
            }

            response.json::<Value>().await.map_err(|e| {
                backoff::Error::permanent(SourceError::InvalidFormat(e.to_string()))
            })
        })
        .await
    }
}

#[async_trait]
impl EventSource for HttpSource {
    async fn fetch_records(&self) -> Result<Vec<Value>, SourceError> {
        debug!(url = %self.url, "Fetching trade records");
        let value = self.get_json().await?;
        records_from_value(value)
    }
}
