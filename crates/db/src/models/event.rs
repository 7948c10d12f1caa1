//! Persisted platform events.

use serde::Serialize;
use sqlx::FromRow;
use tonematch_core::types::{DbId, Timestamp};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub event_type: String,
    pub correlation_id: Option<String>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}
