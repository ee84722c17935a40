//! Predictor HTTP client.
//!
//! Queries the public arrival prediction API for a single stop.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::StopId;

use super::PredictionSource;
use super::error::PredictorError;
use super::types::RawResponse;

/// Default base URL for the prediction API.
const DEFAULT_BASE_URL: &str = "https://api.mobilidade.rio/predictor";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the predictor client.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl PredictorConfig {
    /// Create a config pointing at the production API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Prediction API client.
#[derive(Debug, Clone)]
pub struct PredictorClient {
    http: reqwest::Client,
    base_url: String,
}

impl PredictorClient {
    /// Create a new client with the given configuration.
    pub fn new(config: PredictorConfig) -> Result<Self, PredictorError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(PredictorError::InvalidConfig("empty base URL".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The URL queried for a stop, without the query string.
    fn endpoint(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// Fetch the predictions for a stop.
    ///
    /// Returns the status and body whatever the status code is.
    pub async fn get_predictions(&self, stop: &StopId) -> Result<RawResponse, PredictorError> {
        let url = self.endpoint();

        let response = self
            .http
            .get(&url)
            .query(&[("stop_id", stop.as_str())])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(stop = %stop, status, bytes = body.len(), "fetched predictions");

        Ok(RawResponse::new(status, body))
    }
}

#[async_trait]
impl PredictionSource for PredictorClient {
    async fn fetch(&self, stop: &StopId) -> Result<RawResponse, PredictorError> {
        self.get_predictions(stop).await
    }
}
