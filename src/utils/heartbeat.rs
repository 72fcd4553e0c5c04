use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::time::Duration;

const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Healthchecks-style liveness reporter. A clean run pings the base URL,
/// a failed run pings `{base}/fail`.
pub struct Heartbeat {
    client: Client,
    base_url: String,
}

impl Heartbeat {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(PING_TIMEOUT)
            .build()
            .map_err(EtlError::Monitoring)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub async fn ping_success(&self) -> Result<()> {
        self.ping(&self.base_url).await
    }

    pub async fn ping_failure(&self) -> Result<()> {
        let url = format!("{}/fail", self.base_url);
        self.ping(&url).await
    }

    async fn ping(&self, url: &str) -> Result<()> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(EtlError::Monitoring)?;
        response.error_for_status().map_err(EtlError::Monitoring)?;
        Ok(())
    }
}
