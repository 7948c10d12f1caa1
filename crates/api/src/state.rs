use std::sync::Arc;

use tonematch_core::cache::TtlCache;

use crate::config::ServerConfig;
use crate::handlers::analysis::CachedAnalysis;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tonematch_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<tonematch_events::EventBus>,
    /// Analysis results keyed by `skin_tone:<fingerprint>`.
    pub analysis_cache: Arc<TtlCache<CachedAnalysis>>,
}
