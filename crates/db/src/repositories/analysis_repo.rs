//! Repository for the `skin_tone_analyses` table.

use sqlx::PgPool;
use tonematch_core::types::DbId;

use crate::models::analysis::{CreateAnalysis, StoredAnalysis};

/// Column list for `skin_tone_analyses` queries.
const COLUMNS: &str = "\
    id, image_fingerprint, session_id, monk_skin_tone, monk_hex, derived_hex_code, \
    confidence, confidence_level, analysis_method, skin_pixels_analyzed, \
    regions_analyzed, region_statistics, seasonal_type, undertone, created_at";

pub struct AnalysisRepo;

impl AnalysisRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnalysis,
    ) -> Result<StoredAnalysis, sqlx::Error> {
        let query = format!(
            "INSERT INTO skin_tone_analyses \
                (image_fingerprint, session_id, monk_skin_tone, monk_hex, derived_hex_code, \
                 confidence, confidence_level, analysis_method, skin_pixels_analyzed, \
                 regions_analyzed, region_statistics, seasonal_type, undertone) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoredAnalysis>(&query)
            .bind(&input.image_fingerprint)
            .bind(&input.session_id)
            .bind(&input.monk_skin_tone)
            .bind(&input.monk_hex)
            .bind(&input.derived_hex_code)
            .bind(input.confidence)
            .bind(&input.confidence_level)
            .bind(&input.analysis_method)
            .bind(input.skin_pixels_analyzed)
            .bind(&input.regions_analyzed)
            .bind(&input.region_statistics)
            .bind(&input.seasonal_type)
            .bind(&input.undertone)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StoredAnalysis>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skin_tone_analyses WHERE id = $1");
        sqlx::query_as::<_, StoredAnalysis>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent analyses, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StoredAnalysis>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skin_tone_analyses \
             ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, StoredAnalysis>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
