//! Outcome of one fetch-and-process cycle.

use serde::Serialize;

use crate::domain::{Countdown, MarkerDescriptor, PredictionRecord, TableRow};

/// Everything the dashboard needs when arrivals are forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    /// Actionable records, soonest first.
    pub ordered_records: Vec<PredictionRecord>,

    /// Countdown to the first record.
    pub next_arrival: Countdown,

    /// One marker per actionable record, in the same order.
    pub markers: Vec<MarkerDescriptor>,

    /// Records dropped because they lacked required fields or had mistyped ones.
    pub skipped: usize,
}

impl FeedSnapshot {
    /// Table projection of the ordered records.
    pub fn table_rows(&self) -> Vec<TableRow> {
        self.ordered_records.iter().map(TableRow::from).collect()
    }
}

/// Result of processing one predictor response.
///
/// Constructed fresh on every cycle and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FeedResult {
    /// Arrivals are forecast.
    Success(FeedSnapshot),

    /// The response was well formed but nothing is actionable.
    Empty,

    /// The API answered with a non-success status.
    Failure {
        status_code: u16,
        error_code: Option<String>,
        error_message: Option<String>,
    },

    /// The success body did not match the expected schema.
    Malformed { message: String },

    /// The request never produced a status code.
    NetworkError { message: String },
}

impl FeedResult {
    /// Whether this outcome should be shown as an error.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            FeedResult::Failure { .. } | FeedResult::Malformed { .. } | FeedResult::NetworkError { .. }
        )
    }

    /// The snapshot, if arrivals are forecast.
    pub fn snapshot(&self) -> Option<&FeedSnapshot> {
        match self {
            FeedResult::Success(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}
