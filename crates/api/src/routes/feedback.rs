use axum::routing::get;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

/// Feedback routes mounted at `/feedback`.
///
/// ```text
/// GET  /   -> list_feedback
/// POST /   -> submit_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(feedback::list_feedback).post(feedback::submit_feedback),
    )
}
