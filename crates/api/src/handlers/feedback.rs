//! Handlers for user feedback.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tonematch_core::feedback::{self, FeedbackTarget};
use tonematch_db::models::feedback::{CreateFeedback, NewFeedback};
use tonematch_db::repositories::FeedbackRepo;
use tonematch_events::{event_types, PlatformEvent};

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackListParams {
    pub target_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// POST /api/v1/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(input): Json<CreateFeedback>,
) -> AppResult<impl IntoResponse> {
    let validated = feedback::validate(
        &input.feedback_type,
        &input.target_type,
        &input.target_id,
        input.rating,
        input.comment.as_deref(),
    )?;

    let new = NewFeedback {
        feedback: validated,
        session_id: input
            .session_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
    };
    let stored = FeedbackRepo::create(&state.pool, &new).await?;

    tracing::info!(
        feedback_id = stored.id,
        feedback_type = %stored.feedback_type,
        target_type = %stored.target_type,
        target_id = %stored.target_id,
        "Feedback received",
    );

    let event = PlatformEvent::new(event_types::FEEDBACK_RECEIVED)
        .with_correlation(stored.id.to_string())
        .with_session(stored.session_id.clone())
        .with_payload(json!({
            "feedback_id": stored.id,
            "feedback_type": stored.feedback_type,
            "target_type": stored.target_type,
            "target_id": stored.target_id,
            "rating": stored.rating,
        }));
    state.event_bus.publish(event);

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

/// GET /api/v1/feedback?target_type=&limit=&offset=
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(params): Query<FeedbackListParams>,
) -> AppResult<impl IntoResponse> {
    let target = params
        .target_type
        .as_deref()
        .map(FeedbackTarget::parse)
        .transpose()?;
    let paging = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    };

    let rows = FeedbackRepo::list_recent(
        &state.pool,
        target.map(FeedbackTarget::as_str),
        paging.limit(),
        paging.offset(),
    )
    .await?;

    Ok(Json(DataResponse { data: rows }))
}
