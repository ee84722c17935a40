//! Caching layer for predictor responses.
//!
//! The dashboard re-renders on every request, but the upstream API only
//! needs to be asked once per TTL window. We cache the raw response per
//! stop and re-run the (pure) feed processor on every read.
//!
//! Responses are cached whatever their status code. Transport failures
//! are not cached, so the next refresh retries immediately.

use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::StopId;
use crate::feed::{FeedProcessor, FeedResult};
use crate::predictor::{PredictionSource, PredictorError, RawResponse};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 100,
        }
    }
}

/// A cached raw response and when it was fetched.
#[derive(Debug)]
struct CachedResponse {
    response: RawResponse,
    fetched_at: Instant,
}

/// Cache of raw predictor responses, keyed by stop.
pub struct ResponseCache {
    responses: MokaCache<StopId, Arc<CachedResponse>>,
}

impl ResponseCache {
    /// Create a new cache with the given configuration.
    ///
    /// The configured TTL bounds how long any entry is kept at all;
    /// readers may ask for a shorter freshness window.
    pub fn new(config: &CacheConfig) -> Self {
        let responses = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { responses }
    }

    /// Get a response no older than `ttl`, fetching it from `source`
    /// otherwise.
    ///
    /// Concurrent callers for the same stop share one upstream request.
    /// Transport failures are returned to every waiter but not stored.
    async fn get_or_fetch(
        &self,
        source: &Arc<dyn PredictionSource>,
        stop: &StopId,
        ttl: Duration,
    ) -> Result<Arc<CachedResponse>, Arc<PredictorError>> {
        if let Some(entry) = self.responses.get(stop).await {
            if entry.fetched_at.elapsed() < ttl {
                debug!(stop = %stop, age_ms = entry.fetched_at.elapsed().as_millis() as u64, "cache hit");
                return Ok(entry);
            }
            self.responses.invalidate(stop).await;
        }

        let source = Arc::clone(source);
        let key = stop.clone();
        self.responses
            .try_get_with(stop.clone(), async move {
                debug!(stop = %key, "cache miss, fetching predictions");
                let response = source.fetch(&key).await?;
                Ok::<_, PredictorError>(Arc::new(CachedResponse {
                    response,
                    fetched_at: Instant::now(),
                }))
            })
            .await
    }
}

/// Prediction source with caching and processing.
///
/// Wraps a `PredictionSource`, caches its raw responses and hands back
/// processed `FeedResult`s.
pub struct CachedFeed {
    source: Arc<dyn PredictionSource>,
    processor: FeedProcessor,
    cache: ResponseCache,
}

impl CachedFeed {
    /// Create a new cached feed.
    pub fn new(
        source: Arc<dyn PredictionSource>,
        processor: FeedProcessor,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            source,
            processor,
            cache: ResponseCache::new(cache_config),
        }
    }

    /// Get the processed feed for a stop, fetching if the cached response
    /// is missing or older than `ttl`.
    pub async fn get_or_fetch(&self, stop: &StopId, ttl: Duration) -> FeedResult {
        let outcome = self.cache.get_or_fetch(&self.source, stop, ttl).await;

        self.processor.process_outcome(
            outcome
                .as_ref()
                .map(|cached| &cached.response)
                .map_err(|e| e.as_ref()),
        )
    }
}
