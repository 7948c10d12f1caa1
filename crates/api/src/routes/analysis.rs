//! Route definitions for skin tone analysis.

use axum::routing::get;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Analysis routes mounted at `/analysis`.
///
/// ```text
/// GET  /          -> list_analyses
/// POST /          -> analyze_upload
/// GET  /method    -> get_method
/// GET  /{id}      -> get_analysis
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(analysis::list_analyses).post(analysis::analyze_upload),
        )
        .route("/method", get(analysis::get_method))
        .route("/{id}", get(analysis::get_analysis))
}
