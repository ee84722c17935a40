//! The monitored station.

use serde::Serialize;

use super::StopId;

/// Stop id of the Vaz Lobo BRT station in the prediction API.
pub const VAZ_LOBO_STOP_ID: &str = "3084BC0001U2";

/// Fixed coordinate of the Vaz Lobo BRT station.
pub const VAZ_LOBO_LOCATION: StationLocation = StationLocation {
    latitude: -22.85647,
    longitude: -43.32815,
};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// A station the dashboard watches.
///
/// The location is a constant of the deployment. It is never taken from
/// the prediction API.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub stop_id: StopId,
    pub name: String,
    pub location: StationLocation,
}

impl Station {
    /// Create a station.
    pub fn new(stop_id: StopId, name: impl Into<String>, location: StationLocation) -> Self {
        Self {
            stop_id,
            name: name.into(),
            location,
        }
    }

    /// The Vaz Lobo BRT station.
    pub fn vaz_lobo() -> Self {
        let stop_id = StopId::parse(VAZ_LOBO_STOP_ID).expect("Vaz Lobo stop id is valid");
        Self::new(stop_id, "BRT Vaz Lobo", VAZ_LOBO_LOCATION)
    }
}
