pub mod analysis;
pub mod colors;
pub mod feedback;
pub mod health;
pub mod products;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (?session=)
///
/// /analysis                            upload (POST, multipart), list recent (GET)
/// /analysis/method                     detector info (GET)
/// /analysis/{id}                       stored analysis (GET)
///
/// /colors/skin-tones                   Monk scale (GET)
/// /colors/recommendations              palette for a tone or hex (GET)
/// /colors/palette/{monk_id}            stored palette rows (GET, ?category)
/// /colors/suggestions                  coarse suggestions (GET, ?skin_tone)
///
/// /products/makeup                     search, import (GET, POST)
/// /products/makeup/types               distinct product types (GET)
/// /products/apparel                    search, import (GET, POST)
/// /products/recommendations            scored picks for a tone (GET)
///
/// /feedback                            submit, list (POST, GET)
///
/// /metrics                             connection and cache counters (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/analysis", analysis::router())
        .nest("/colors", colors::router())
        .nest("/products", products::router())
        .nest("/feedback", feedback::router())
        .route("/metrics", get(handlers::metrics::get_metrics))
}
