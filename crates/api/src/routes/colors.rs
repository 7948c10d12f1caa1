//! Route definitions for the Monk scale and palettes.

use axum::routing::get;
use axum::Router;

use crate::handlers::colors;
use crate::state::AppState;

/// Color routes mounted at `/colors`.
///
/// ```text
/// GET /skin-tones          -> list_skin_tones
/// GET /recommendations     -> get_recommendations
/// GET /palette/{monk_id}   -> get_palette
/// GET /suggestions         -> get_suggestions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/skin-tones", get(colors::list_skin_tones))
        .route("/recommendations", get(colors::get_recommendations))
        .route("/palette/{monk_id}", get(colors::get_palette))
        .route("/suggestions", get(colors::get_suggestions))
}
