//! HTTP collaborators outside the event channel: the gate status
//! endpoint and the usage-recording endpoint. Plain request/response,
//! no retries.

use thiserror::Error;
use tracing::info;

use crate::gate::GateStatus;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone)]
pub struct BlindDateApi {
    http: reqwest::Client,
    base_url: String,
}

impl BlindDateApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Current usage/cooldown status for the local user.
    pub async fn fetch_gate_status(&self) -> Result<GateStatus, ApiError> {
        let url = format!("{}/blind-date/status", self.base_url);
        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        Ok(resp.json::<GateStatus>().await?)
    }

    /// Record one queue usage after a successful match. Callers treat
    /// failure as non-fatal: it is logged and never blocks session entry.
    pub async fn record_usage(&self) -> Result<(), ApiError> {
        let url = format!("{}/blind-date/usage", self.base_url);
        let resp = self.http.post(&url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status(resp.status()));
        }
        info!("Blind date usage recorded");
        Ok(())
    }
}
