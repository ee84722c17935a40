//! Web layer for the arrivals dashboard.
//!
//! Provides the HTML dashboard and a JSON view of the same feed.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
