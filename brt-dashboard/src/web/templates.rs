//! Askama templates for the web frontend.

use askama::Template;
use serde::Serialize;

use crate::domain::{MarkerDescriptor, Station};
use crate::feed::FeedResult;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Dashboard page: countdown, arrivals table and map.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub station_name: String,
    pub checked_at: String,
    /// Seconds between automatic page reloads.
    pub refresh_secs: u64,
    pub countdown: Option<String>,
    pub rows: Vec<RowView>,
    /// Records dropped for missing or mistyped fields, shown as a footnote.
    pub skipped: usize,
    pub no_arrivals: bool,
    pub error: Option<ErrorView>,
    /// Map data, embedded in a script tag.
    pub map_json: String,
}

impl DashboardTemplate {
    /// Build the page for one feed result.
    pub fn from_feed(
        station: &Station,
        feed: &FeedResult,
        checked_at: String,
        refresh_secs: u64,
    ) -> Self {
        let mut page = Self {
            station_name: station.name.clone(),
            checked_at,
            refresh_secs,
            countdown: None,
            rows: Vec::new(),
            skipped: 0,
            no_arrivals: false,
            error: None,
            map_json: String::new(),
        };

        let markers: &[MarkerDescriptor] = match feed {
            FeedResult::Success(snapshot) => {
                page.countdown = Some(format!("The next BRT should be {}", snapshot.next_arrival));
                page.rows = snapshot.ordered_records.iter().map(RowView::from).collect();
                page.skipped = snapshot.skipped;
                &snapshot.markers
            }
            FeedResult::Empty => {
                page.no_arrivals = true;
                &[]
            }
            other => {
                page.error = ErrorView::from_feed(other);
                &[]
            }
        };

        page.map_json = MapView::new(station, markers).to_script_json();
        page
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Arrivals table row view model.
#[derive(Debug, Clone)]
pub struct RowView {
    pub route_code: String,
    pub line: String,
    pub arrival_display: String,
}

impl From<&crate::domain::PredictionRecord> for RowView {
    fn from(record: &crate::domain::PredictionRecord) -> Self {
        Self {
            route_code: record.route_code.clone(),
            line: record.line.clone(),
            arrival_display: format!("{:.2}", record.estimated_minutes),
        }
    }
}

/// Error panel view model.
#[derive(Debug, Clone)]
pub struct ErrorView {
    pub title: String,
    pub status_code: Option<u16>,
    pub code: Option<String>,
    pub message: String,
}

impl ErrorView {
    /// Create from an error outcome. Returns `None` for non-error outcomes.
    pub fn from_feed(feed: &FeedResult) -> Option<Self> {
        match feed {
            FeedResult::Failure {
                status_code,
                error_code,
                error_message,
            } => Some(Self {
                title: "Could not retrieve data from the API. Try again later.".to_string(),
                status_code: Some(*status_code),
                code: error_code.clone(),
                message: error_message
                    .clone()
                    .unwrap_or_else(|| "no message".to_string()),
            }),
            FeedResult::Malformed { message } => Some(Self {
                title: "The API returned data in an unexpected format.".to_string(),
                status_code: None,
                code: None,
                message: message.clone(),
            }),
            FeedResult::NetworkError { message } => Some(Self {
                title: "Could not reach the prediction API.".to_string(),
                status_code: None,
                code: None,
                message: message.clone(),
            }),
            FeedResult::Success(_) | FeedResult::Empty => None,
        }
    }
}

/// Data handed to the map script.
#[derive(Debug, Serialize)]
pub struct MapView<'a> {
    pub station: MapPoint,
    pub vehicles: &'a [MarkerDescriptor],
}

/// A labelled map point.
#[derive(Debug, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl<'a> MapView<'a> {
    /// Create from the station and the vehicle markers.
    pub fn new(station: &Station, vehicles: &'a [MarkerDescriptor]) -> Self {
        Self {
            station: MapPoint {
                latitude: station.location.latitude,
                longitude: station.location.longitude,
                label: format!("{} station", station.name),
            },
            vehicles,
        }
    }

    /// Serialize for embedding inside a `<script>` element.
    ///
    /// `</` is escaped so that no label can close the script early.
    pub fn to_script_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "null".to_string())
            .replace("</", "<\\/")
    }
}
