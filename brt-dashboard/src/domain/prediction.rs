//! Arrival prediction types.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

/// One forecasted vehicle arrival at the station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    /// Vehicle/trip code (`codigo`, or the line name when absent).
    pub route_code: String,

    /// Line identifier (`trip_short_name`, or the vehicle code when absent).
    pub line: String,

    /// When the prediction was generated, as reported by the server.
    /// Not interpreted.
    pub timestamp: Option<String>,

    /// Minutes until arrival. May be zero or negative for departed vehicles.
    pub estimated_minutes: f64,

    /// Current vehicle latitude.
    pub latitude: f64,

    /// Current vehicle longitude.
    pub longitude: f64,
}

/// Countdown to the next arrival.
///
/// Keeps the full-precision minutes value; rounding only happens when the
/// seconds are read for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Countdown {
    estimated_minutes: f64,
}

impl Countdown {
    /// Create a countdown from a minutes value.
    pub fn from_minutes(estimated_minutes: f64) -> Self {
        Self { estimated_minutes }
    }

    /// The full-precision minutes value.
    pub fn estimated_minutes(&self) -> f64 {
        self.estimated_minutes
    }

    /// Whole minutes and rounded remaining seconds.
    ///
    /// A fraction that rounds up to 60 seconds carries into the minutes.
    pub fn minutes_and_seconds(&self) -> (u64, u64) {
        let whole = self.estimated_minutes.floor();
        let seconds = ((self.estimated_minutes - whole) * 60.0).round() as u64;
        let minutes = whole.max(0.0) as u64;
        if seconds >= 60 {
            (minutes + 1, 0)
        } else {
            (minutes, seconds)
        }
    }

    /// Whole minutes part of the countdown.
    pub fn minutes(&self) -> u64 {
        self.minutes_and_seconds().0
    }

    /// Rounded seconds part of the countdown.
    pub fn seconds(&self) -> u64 {
        self.minutes_and_seconds().1
    }

    /// The countdown as a duration.
    ///
    /// Negative estimates are zero; estimates too large for a `Duration`
    /// saturate at `Duration::MAX`.
    pub fn as_duration(&self) -> Duration {
        Duration::try_from_secs_f64((self.estimated_minutes * 60.0).max(0.0))
            .unwrap_or(Duration::MAX)
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (minutes, seconds) = self.minutes_and_seconds();
        write!(
            f,
            "arriving in {minutes} minute(s) and {seconds} second(s)"
        )
    }
}

/// A map marker for one incoming vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub latitude: f64,
    pub longitude: f64,
    /// Arrival estimate, floored to whole minutes.
    pub arrival_minutes: u64,
    /// Tooltip text.
    pub label: String,
}

impl MarkerDescriptor {
    /// Build the marker for an actionable record.
    pub fn from_record(record: &PredictionRecord) -> Self {
        let arrival_minutes = record.estimated_minutes.floor().max(0.0) as u64;
        Self {
            latitude: record.latitude,
            longitude: record.longitude,
            arrival_minutes,
            label: format!("Arrival time for this BRT: {arrival_minutes} min"),
        }
    }
}

/// One row of the arrivals table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub route_code: String,
    pub line: String,
    pub arrival_minutes: f64,
}

impl From<&PredictionRecord> for TableRow {
    fn from(record: &PredictionRecord) -> Self {
        Self {
            route_code: record.route_code.clone(),
            line: record.line.clone(),
            arrival_minutes: record.estimated_minutes,
        }
    }
}
