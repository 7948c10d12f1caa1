//! Repository for the `colors` palette table.

use sqlx::PgPool;
use tonematch_core::palette;

use crate::models::color::{Color, CreateColor};

/// Column list for `colors` queries.
const COLUMNS: &str = "\
    id, hex_code, color_name, suitable_skin_tone, seasonal_palette, \
    category, is_avoid, created_at";

pub struct ColorRepo;

impl ColorRepo {
    /// Insert many rows in one statement. Returns the number inserted.
    pub async fn insert_batch(pool: &PgPool, rows: &[CreateColor]) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }
        let hex: Vec<&str> = rows.iter().map(|r| r.hex_code.as_str()).collect();
        let names: Vec<&str> = rows.iter().map(|r| r.color_name.as_str()).collect();
        let tones: Vec<&str> = rows.iter().map(|r| r.suitable_skin_tone.as_str()).collect();
        let seasons: Vec<&str> = rows.iter().map(|r| r.seasonal_palette.as_str()).collect();
        let categories: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        let avoid: Vec<bool> = rows.iter().map(|r| r.is_avoid).collect();

        let result = sqlx::query(
            "INSERT INTO colors \
                (hex_code, color_name, suitable_skin_tone, seasonal_palette, category, is_avoid) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[], $6::bool[])",
        )
        .bind(&hex)
        .bind(&names)
        .bind(&tones)
        .bind(&seasons)
        .bind(&categories)
        .bind(&avoid)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Load the static palette table when `colors` is empty.
    ///
    /// Returns the number of rows inserted (zero if the table was already
    /// populated).
    pub async fn seed_defaults(pool: &PgPool) -> Result<u64, sqlx::Error> {
        if Self::count(pool).await? > 0 {
            return Ok(0);
        }
        let rows: Vec<CreateColor> = palette::palette_rows()
            .into_iter()
            .map(CreateColor::from)
            .collect();
        let inserted = Self::insert_batch(pool, &rows).await?;
        tracing::info!(inserted, "Seeded colors table from default palettes");
        Ok(inserted)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM colors")
            .fetch_one(pool)
            .await
    }

    /// Colors stored for a skin tone, optionally restricted to one category.
    ///
    /// Recommended colors come before colors to avoid; within each group
    /// rows keep insertion order.
    pub async fn list_for_tone(
        pool: &PgPool,
        skin_tone: &str,
        category: Option<&str>,
    ) -> Result<Vec<Color>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM colors \
             WHERE suitable_skin_tone = $1 \
               AND ($2::text IS NULL OR category = $2) \
             ORDER BY is_avoid, id"
        );
        sqlx::query_as::<_, Color>(&query)
            .bind(skin_tone)
            .bind(category)
            .fetch_all(pool)
            .await
    }
}
