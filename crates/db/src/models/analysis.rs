//! Persisted skin tone analyses.

use serde::Serialize;
use sqlx::FromRow;
use tonematch_core::analysis::SkinToneAnalysis;
use tonematch_core::types::{DbId, Timestamp};

/// A row from the `skin_tone_analyses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoredAnalysis {
    pub id: DbId,
    pub image_fingerprint: String,
    pub session_id: Option<String>,
    pub monk_skin_tone: String,
    pub monk_hex: String,
    pub derived_hex_code: String,
    pub confidence: f64,
    pub confidence_level: String,
    pub analysis_method: String,
    pub skin_pixels_analyzed: i32,
    pub regions_analyzed: Vec<String>,
    pub region_statistics: serde_json::Value,
    pub seasonal_type: String,
    pub undertone: String,
    pub created_at: Timestamp,
}

/// Insert payload built from an analysis result.
#[derive(Debug, Clone)]
pub struct CreateAnalysis {
    pub image_fingerprint: String,
    pub session_id: Option<String>,
    pub monk_skin_tone: String,
    pub monk_hex: String,
    pub derived_hex_code: String,
    pub confidence: f64,
    pub confidence_level: String,
    pub analysis_method: String,
    pub skin_pixels_analyzed: i32,
    pub regions_analyzed: Vec<String>,
    pub region_statistics: serde_json::Value,
    pub seasonal_type: String,
    pub undertone: String,
}

impl CreateAnalysis {
    pub fn from_result(
        result: &SkinToneAnalysis,
        image_fingerprint: impl Into<String>,
        session_id: Option<String>,
    ) -> Self {
        Self {
            image_fingerprint: image_fingerprint.into(),
            session_id,
            monk_skin_tone: result.monk_skin_tone.id(),
            monk_hex: result.monk_hex.to_string(),
            derived_hex_code: result.derived_hex_code.clone(),
            confidence: result.confidence,
            confidence_level: result.confidence_level.as_str().to_string(),
            analysis_method: result.analysis_method.as_str().to_string(),
            skin_pixels_analyzed: i32::try_from(result.skin_pixels_analyzed).unwrap_or(i32::MAX),
            regions_analyzed: result
                .regions_analyzed
                .iter()
                .map(|r| r.to_string())
                .collect(),
            region_statistics: serde_json::to_value(&result.region_statistics)
                .unwrap_or_else(|_| serde_json::json!({})),
            seasonal_type: result.seasonal_type.name().to_string(),
            undertone: result.undertone.as_str().to_string(),
        }
    }
}
