use super::client::HttpClient;
use crate::error::DashboardError;
use async_trait::async_trait;
use std::time::Duration;

pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// Client with the default 30s request and 10s connect timeouts.
    pub fn new() -> Result<Self, DashboardError> {
        Self::with_timeouts(Duration::from_secs(30), Duration::from_secs(10))
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self, DashboardError> {
        Self::from_builder(
            reqwest::Client::builder()
                .timeout(timeout)
                .connect_timeout(connect_timeout),
        )
    }

    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the TLS backend or proxy
    /// settings reject the builder.
    pub fn from_builder(builder: reqwest::ClientBuilder) -> Result<Self, DashboardError> {
        builder
            .build()
            .map(Self)
            .map_err(|e| DashboardError::Config(format!("HTTP client: {e}")))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
