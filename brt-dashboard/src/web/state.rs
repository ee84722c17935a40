//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::CachedFeed;
use crate::domain::Station;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached, processed prediction feed
    pub feed: Arc<CachedFeed>,

    /// The station shown on the dashboard
    pub station: Arc<Station>,

    /// How long a fetched response is reused; also the page refresh period
    pub cache_ttl: Duration,
}

impl AppState {
    /// Create a new app state.
    pub fn new(feed: CachedFeed, station: Station, cache_ttl: Duration) -> Self {
        Self {
            feed: Arc::new(feed),
            station: Arc::new(station),
            cache_ttl,
        }
    }

    /// Fetch (or reuse) the processed feed for the dashboard station.
    pub async fn current_feed(&self) -> crate::feed::FeedResult {
        self.feed
            .get_or_fetch(&self.station.stop_id, self.cache_ttl)
            .await
    }
}
