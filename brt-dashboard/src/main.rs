use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use brt_dashboard::cache::{CacheConfig, CachedFeed};
use brt_dashboard::config::AppConfig;
use brt_dashboard::domain::Station;
use brt_dashboard::feed::FeedProcessor;
use brt_dashboard::predictor::{MockPredictorClient, PredictionSource, PredictorClient};
use brt_dashboard::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;

    // Pick the prediction source
    let source: Arc<dyn PredictionSource> = match &config.mock_dir {
        Some(dir) => {
            let mock = MockPredictorClient::new(dir)?;
            warn!(
                dir = %dir.display(),
                stops = mock.available_stops().len(),
                "serving mock predictions"
            );
            Arc::new(mock)
        }
        None => {
            info!(url = %config.predictor_base_url, "using live prediction API");
            Arc::new(PredictorClient::new(config.predictor())?)
        }
    };

    // Create cached feed
    let cache_config = CacheConfig {
        ttl: config.cache_ttl,
        ..CacheConfig::default()
    };
    let policy = config.feed_policy();
    info!(
        min_minutes = policy.min_minutes,
        max_minutes = ?policy.max_minutes,
        ttl_secs = config.cache_ttl.as_secs(),
        "feed policy"
    );
    let processor = FeedProcessor::new(policy);
    let feed = CachedFeed::new(source, processor, &cache_config);

    let station = Station::vaz_lobo();
    info!(stop = %station.stop_id, name = %station.name, "watching station");

    // Build app state and router
    let state = AppState::new(feed, station, config.cache_ttl);
    let app = create_router(state, &config.static_dir);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("BRT dashboard listening on http://{}", config.bind_addr);
    info!("  GET  /              - Dashboard");
    info!("  GET  /api/arrivals  - Arrivals as JSON");
    info!("  GET  /health        - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
