//! Mock predictor client for development without API access.
//!
//! Loads sample responses from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::StopId;

use super::PredictionSource;
use super::error::PredictorError;
use super::types::RawResponse;

/// Mock predictor that serves data from JSON files.
///
/// Files are named `{STOP_ID}.json` and hold a full response body. The
/// bodies are served verbatim with status 200, so malformed fixtures reach
/// the feed processor the same way a broken upstream would.
#[derive(Clone)]
pub struct MockPredictorClient {
    bodies: Arc<HashMap<StopId, String>>,
}

impl MockPredictorClient {
    /// Create a new mock client by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, PredictorError> {
        let bodies = load_dir(data_dir.as_ref())?;
        Ok(Self {
            bodies: Arc::new(bodies),
        })
    }

    /// List stops available in the mock data.
    pub fn available_stops(&self) -> Vec<StopId> {
        self.bodies.keys().cloned().collect()
    }
}

#[async_trait]
impl PredictionSource for MockPredictorClient {
    async fn fetch(&self, stop: &StopId) -> Result<RawResponse, PredictorError> {
        match self.bodies.get(stop) {
            Some(body) => Ok(RawResponse::new(200, body.clone())),
            None => {
                let body = serde_json::json!({
                    "code": "not_found",
                    "message": format!("no mock data for stop {stop}"),
                });
                Ok(RawResponse::new(404, body.to_string()))
            }
        }
    }
}

/// Read every `{STOP_ID}.json` file in a directory.
fn load_dir(data_dir: &Path) -> Result<HashMap<StopId, String>, PredictorError> {
    let mut bodies = HashMap::new();

    let entries = std::fs::read_dir(data_dir).map_err(|e| PredictorError::Io {
        message: format!("failed to read mock data directory {:?}: {}", data_dir, e),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| PredictorError::Io {
            message: format!("failed to read directory entry: {}", e),
        })?;

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| PredictorError::Io {
                message: format!("invalid filename: {:?}", path),
            })?;

        let stop = StopId::parse(stem).map_err(|e| PredictorError::Io {
            message: format!("{:?}: {}", path, e),
        })?;

        let body = std::fs::read_to_string(&path).map_err(|e| PredictorError::Io {
            message: format!("failed to read {:?}: {}", path, e),
        })?;

        bodies.insert(stop, body);
    }

    if bodies.is_empty() {
        return Err(PredictorError::Io {
            message: format!("no mock prediction files found in {:?}", data_dir),
        });
    }

    Ok(bodies)
}
