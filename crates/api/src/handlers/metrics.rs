//! Service metrics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tonematch_core::cache::CacheStats;

use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceMetrics {
    pub websocket_connections: usize,
    pub event_subscribers: usize,
    pub analysis_cache: CacheStats,
    pub analysis_cache_ttl_secs: u64,
}

/// GET /api/v1/metrics
pub async fn get_metrics(State(state): State<AppState>) -> impl IntoResponse {
    let metrics = ServiceMetrics {
        websocket_connections: state.ws_manager.connection_count().await,
        event_subscribers: state.event_bus.subscriber_count(),
        analysis_cache: state.analysis_cache.stats().await,
        analysis_cache_ttl_secs: state.analysis_cache.default_ttl().as_secs(),
    };
    Json(DataResponse { data: metrics })
}
