//! Data transfer objects for web responses.

use serde::Serialize;

use crate::domain::{Station, TableRow};
use crate::feed::FeedResult;

/// Station information in API responses.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Prediction API stop id
    pub stop_id: String,

    /// Display name
    pub name: String,

    /// Fixed station latitude
    pub latitude: f64,

    /// Fixed station longitude
    pub longitude: f64,
}

impl StationResult {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            stop_id: station.stop_id.as_str().to_string(),
            name: station.name.clone(),
            latitude: station.location.latitude,
            longitude: station.location.longitude,
        }
    }
}

/// Response for the arrivals endpoint.
#[derive(Debug, Serialize)]
pub struct ArrivalsResponse {
    /// The station being watched
    pub station: StationResult,

    /// When this response was produced (RFC 3339, local time)
    pub checked_at: String,

    /// Countdown text for the next arrival, if any
    pub countdown: Option<String>,

    /// Whole seconds until the next arrival, if any
    pub next_arrival_secs: Option<u64>,

    /// Table projection of the actionable arrivals
    pub rows: Vec<TableRow>,

    /// The full processing outcome
    pub feed: FeedResult,
}

impl ArrivalsResponse {
    /// Build the response for one feed result.
    pub fn new(station: &Station, feed: FeedResult, checked_at: String) -> Self {
        let (countdown, next_arrival_secs, rows) = match feed.snapshot() {
            Some(snapshot) => (
                Some(snapshot.next_arrival.to_string()),
                Some(snapshot.next_arrival.as_duration().as_secs()),
                snapshot.table_rows(),
            ),
            None => (None, None, Vec::new()),
        };

        Self {
            station: StationResult::from_station(station),
            checked_at,
            countdown,
            next_arrival_secs,
            rows,
            feed,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
