//! Feedback rows and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tonematch_core::feedback::ValidatedFeedback;
use tonematch_core::types::{DbId, Timestamp};

/// A row from the `feedback` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Feedback {
    pub id: DbId,
    pub feedback_type: String,
    pub target_type: String,
    pub target_id: String,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub session_id: Option<String>,
    pub created_at: Timestamp,
}

/// Request body for submitting feedback.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFeedback {
    pub feedback_type: String,
    pub target_type: String,
    pub target_id: String,
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub session_id: Option<String>,
}

/// Validated insert payload.
#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub feedback: ValidatedFeedback,
    pub session_id: Option<String>,
}
