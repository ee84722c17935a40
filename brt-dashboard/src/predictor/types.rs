//! Prediction API response DTOs.
//!
//! These types map directly to the predictor JSON API responses.
//! The `results` array is kept as raw JSON values and each record is
//! decoded on its own, so one incomplete or mistyped record can be
//! reported and skipped instead of failing the whole response.

use serde::Deserialize;

/// A raw HTTP response from the predictor: status code and body text.
///
/// Every status code is represented here. Only transport failures, where no
/// status was ever received, become errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Create a raw response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is the success code (200).
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Successful predictor response body.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorResponse {
    /// Predicted arrivals at the requested stop, decoded one by one.
    pub results: Vec<serde_json::Value>,
}

/// One prediction as sent by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrediction {
    /// Vehicle code.
    pub codigo: Option<String>,

    /// Line name (e.g., "22", "42A").
    pub trip_short_name: Option<String>,

    /// Generation time. The API has sent both strings and epoch numbers.
    #[serde(rename = "dataHora")]
    pub data_hora: Option<serde_json::Value>,

    /// Minutes until arrival at the stop.
    pub estimated_time_arrival: Option<f64>,

    /// Current vehicle latitude.
    pub latitude: Option<f64>,

    /// Current vehicle longitude.
    pub longitude: Option<f64>,
}

/// Error body sent with non-200 responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<serde_json::Value>,
    pub message: Option<String>,
}
