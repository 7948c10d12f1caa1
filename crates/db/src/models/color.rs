//! Palette color rows.

use serde::Serialize;
use sqlx::FromRow;
use tonematch_core::palette::PaletteRow;
use tonematch_core::types::{DbId, Timestamp};

/// A row from the `colors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Color {
    pub id: DbId,
    pub hex_code: String,
    pub color_name: String,
    pub suitable_skin_tone: String,
    pub seasonal_palette: String,
    pub category: String,
    pub is_avoid: bool,
    pub created_at: Timestamp,
}

/// Insert payload for the `colors` table.
#[derive(Debug, Clone)]
pub struct CreateColor {
    pub hex_code: String,
    pub color_name: String,
    pub suitable_skin_tone: String,
    pub seasonal_palette: String,
    pub category: String,
    pub is_avoid: bool,
}

impl From<PaletteRow> for CreateColor {
    fn from(row: PaletteRow) -> Self {
        Self {
            hex_code: row.hex_code,
            color_name: row.color_name,
            suitable_skin_tone: row.suitable_skin_tone.id(),
            seasonal_palette: row.seasonal_palette.name().to_string(),
            category: row.category.as_str().to_string(),
            is_avoid: row.is_avoid,
        }
    }
}
