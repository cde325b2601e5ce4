use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;
use types::position::{PositionSummary, summarize_positions};

/// Failure talking to the exchange REST API
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream body could not be decoded: {0}")]
    Body(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else if e.is_decode() {
            UpstreamError::Body(e.to_string())
        } else {
            UpstreamError::Transport(e.to_string())
        }
    }
}

/// HTTP client for the tracked account's position data.
#[derive(Debug, Clone)]
pub struct AccountClient {
    http: Client,
    url: String,
}

impl AccountClient {
    pub fn new(url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    /// Fetch the raw account-query response. One attempt, no retries.
    pub async fn fetch_account(&self) -> Result<Value, UpstreamError> {
        let res = self.http.get(&self.url).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        Ok(res.json::<Value>().await?)
    }

    /// Fetch and summarize the account's positions.
    pub async fn position_summary(&self) -> Result<PositionSummary, UpstreamError> {
        let response = self.fetch_account().await.inspect_err(|e| {
            warn!(error = %e, url = %self.url, "Account fetch failed");
        })?;
        Ok(summarize_positions(Some(&response)))
    }
}
