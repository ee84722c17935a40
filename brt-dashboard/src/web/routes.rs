//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::{Local, SecondsFormat};
use tower_http::services::ServeDir;
use tracing::error;

use crate::feed::FeedResult;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/health", get(health))
        .route("/api/arrivals", get(arrivals))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Dashboard page.
///
/// Upstream failures render an error panel; the page itself is still 200.
async fn dashboard_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let feed = state.current_feed().await;
    let checked_at = Local::now().format("%H:%M:%S").to_string();

    let template = DashboardTemplate::from_feed(
        &state.station,
        &feed,
        checked_at,
        state.cache_ttl.as_secs().max(1),
    );
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })?;

    Ok(Html(html).into_response())
}

/// Arrivals as JSON.
async fn arrivals(State(state): State<AppState>) -> Response {
    let feed = state.current_feed().await;
    let status = status_for(&feed);
    let checked_at = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);

    let body = ArrivalsResponse::new(&state.station, feed, checked_at);
    (status, Json(body)).into_response()
}

/// HTTP status for a feed outcome.
fn status_for(feed: &FeedResult) -> StatusCode {
    match feed {
        FeedResult::NetworkError { .. } => StatusCode::GATEWAY_TIMEOUT,
        other if other.is_error() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    Internal { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
