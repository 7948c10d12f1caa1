//! Repository for the `feedback` table.

use sqlx::PgPool;

use crate::models::feedback::{Feedback, NewFeedback};

/// Column list for `feedback` queries.
const COLUMNS: &str =
    "id, feedback_type, target_type, target_id, rating, comment, session_id, created_at";

pub struct FeedbackRepo;

impl FeedbackRepo {
    pub async fn create(pool: &PgPool, input: &NewFeedback) -> Result<Feedback, sqlx::Error> {
        let fb = &input.feedback;
        let query = format!(
            "INSERT INTO feedback \
                (feedback_type, target_type, target_id, rating, comment, session_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(fb.kind.as_str())
            .bind(fb.target.as_str())
            .bind(&fb.target_id)
            .bind(fb.rating)
            .bind(&fb.comment)
            .bind(&input.session_id)
            .fetch_one(pool)
            .await
    }

    /// Recent feedback, newest first, optionally for one target type.
    pub async fn list_recent(
        pool: &PgPool,
        target_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Feedback>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM feedback \
             WHERE ($1::text IS NULL OR target_type = $1) \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Feedback>(&query)
            .bind(target_type)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
