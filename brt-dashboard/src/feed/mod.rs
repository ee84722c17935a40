//! Arrival feed processing.
//!
//! The pure core of the dashboard: one raw predictor response in, one
//! `FeedResult` out.

mod config;
mod processor;
mod result;

pub use config::{DEFAULT_MAX_MINUTES, FeedPolicy};
pub use processor::{FeedProcessor, process};
pub use result::{FeedResult, FeedSnapshot};
