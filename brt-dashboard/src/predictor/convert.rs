//! Conversion from predictor DTOs to domain types.

use tracing::warn;

use crate::domain::PredictionRecord;

use super::types::{ApiErrorBody, PredictorResponse, RawPrediction};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The body is not a predictor response at all
    #[error("malformed response: {0}")]
    MalformedBody(String),

    /// A record lacks a required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A record field has the wrong JSON type
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Records parsed from a successful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPredictions {
    pub records: Vec<PredictionRecord>,
    /// Number of records dropped because of missing or mistyped fields.
    pub skipped: usize,
}

/// Parse a successful response body into domain records.
///
/// A body that does not decode as `{"results": [...]}` is an error.
/// Individual incomplete or mistyped records are logged and skipped.
pub fn parse_predictions(body: &str) -> Result<ParsedPredictions, ConversionError> {
    let response: PredictorResponse = serde_json::from_str(body)
        .map_err(|e| ConversionError::MalformedBody(e.to_string()))?;

    let mut records = Vec::with_capacity(response.results.len());
    let mut skipped = 0;

    for (index, value) in response.results.into_iter().enumerate() {
        let decoded = serde_json::from_value::<RawPrediction>(value)
            .map_err(|e| ConversionError::InvalidRecord(e.to_string()))
            .and_then(|raw| convert_prediction(&raw));

        match decoded {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(index, error = %e, "skipping prediction record");
                skipped += 1;
            }
        }
    }

    Ok(ParsedPredictions { records, skipped })
}

/// Convert a single raw prediction.
pub fn convert_prediction(raw: &RawPrediction) -> Result<PredictionRecord, ConversionError> {
    let route_code = raw
        .codigo
        .clone()
        .or_else(|| raw.trip_short_name.clone())
        .ok_or(ConversionError::MissingField("codigo / trip_short_name"))?;

    let line = raw
        .trip_short_name
        .clone()
        .unwrap_or_else(|| route_code.clone());

    let estimated_minutes = raw
        .estimated_time_arrival
        .ok_or(ConversionError::MissingField("estimated_time_arrival"))?;
    let latitude = raw
        .latitude
        .ok_or(ConversionError::MissingField("latitude"))?;
    let longitude = raw
        .longitude
        .ok_or(ConversionError::MissingField("longitude"))?;

    let timestamp = raw.data_hora.as_ref().map(|v| match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    });

    Ok(PredictionRecord {
        route_code,
        line,
        timestamp,
        estimated_minutes,
        latitude,
        longitude,
    })
}

/// Extract the application error code and message from an error body.
///
/// Bodies that are not JSON, or lack the fields, yield `None`.
pub fn parse_error_body(body: &str) -> (Option<String>, Option<String>) {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

    let code = parsed.code.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    });

    (code, parsed.message)
}
