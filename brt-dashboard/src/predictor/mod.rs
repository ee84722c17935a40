//! Arrival prediction API client.
//!
//! This module provides an HTTP client for the public BRT prediction API,
//! a file-backed mock with the same interface, and the typed schema for
//! its JSON responses.
//!
//! Key characteristics of the API:
//! - Queried per stop: `GET /predictor/?stop_id=<stop>`
//! - Success bodies carry a `results` array; errors carry `code`/`message`
//! - Estimates are fractional minutes and may be zero or negative

mod client;
mod convert;
mod error;
mod mock;
mod types;

use async_trait::async_trait;

use crate::domain::StopId;

pub use client::{PredictorClient, PredictorConfig};
pub use convert::{
    ConversionError, ParsedPredictions, convert_prediction, parse_error_body, parse_predictions,
};
pub use error::PredictorError;
pub use mock::MockPredictorClient;
pub use types::{ApiErrorBody, PredictorResponse, RawPrediction, RawResponse};

/// A source of raw prediction responses.
#[async_trait]
pub trait PredictionSource: Send + Sync {
    /// Fetch the raw response for a stop.
    ///
    /// Errors only when no status code could be obtained.
    async fn fetch(&self, stop: &StopId) -> Result<RawResponse, PredictorError>;
}
