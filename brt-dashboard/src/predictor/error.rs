//! Predictor client error types.

/// Errors from the predictor clients.
///
/// Non-success status codes are not errors here: they are returned as a
/// `RawResponse` and classified by the feed processor.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// HTTP request failed before a status was received (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading mock data failed
    #[error("mock data error: {message}")]
    Io { message: String },

    /// Client configuration is unusable
    #[error("invalid predictor configuration: {0}")]
    InvalidConfig(String),
}
