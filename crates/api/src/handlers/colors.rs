//! Handlers for the Monk scale and color palettes.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tonematch_core::monk::{Depth, MonkTone};
use tonematch_core::palette::{self, ColorCategory, PaletteQuery};
use tonematch_core::season::{SeasonalType, Undertone};
use tonematch_db::repositories::ColorRepo;
use tonematch_events::{event_types, PlatformEvent};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// One entry of the Monk scale as shown to clients.
#[derive(Debug, Serialize)]
pub struct SkinToneInfo {
    pub id: MonkTone,
    pub display_name: String,
    pub hex: &'static str,
    pub depth: Depth,
    pub seasonal_type: SeasonalType,
    pub undertone: Undertone,
}

impl From<MonkTone> for SkinToneInfo {
    fn from(tone: MonkTone) -> Self {
        let season = tone.seasonal_type();
        Self {
            id: tone,
            display_name: tone.display_name(),
            hex: tone.hex(),
            depth: tone.depth(),
            seasonal_type: season,
            undertone: season.undertone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaletteParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionParams {
    pub skin_tone: Option<String>,
}

/// GET /api/v1/colors/skin-tones
pub async fn list_skin_tones() -> impl IntoResponse {
    let tones: Vec<SkinToneInfo> = MonkTone::ALL.into_iter().map(SkinToneInfo::from).collect();
    Json(DataResponse { data: tones })
}

/// GET /api/v1/colors/recommendations?skin_tone=&hex_color=
///
/// Unknown or missing inputs fall back to the universal palette rather
/// than failing.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<PaletteQuery>,
) -> impl IntoResponse {
    let recommendation = palette::recommend(&query);

    tracing::debug!(
        skin_tone = ?query.skin_tone,
        hex_color = ?query.hex_color,
        resolved = ?recommendation.monk_skin_tone,
        "Color recommendation served",
    );

    state.event_bus.publish(
        PlatformEvent::new(event_types::COLORS_RECOMMENDED).with_payload(json!({
            "requested_skin_tone": query.skin_tone,
            "requested_hex_color": query.hex_color,
            "monk_skin_tone": recommendation.monk_skin_tone,
            "seasonal_type": recommendation.seasonal_type,
        })),
    );

    Json(DataResponse {
        data: recommendation,
    })
}

/// GET /api/v1/colors/palette/{monk_id}?category=
///
/// Stored palette rows for one tone, recommended colors before avoided ones.
/// Without a `category` the `general` rows (the full palette) are returned.
pub async fn get_palette(
    State(state): State<AppState>,
    Path(monk_id): Path<String>,
    Query(params): Query<PaletteParams>,
) -> AppResult<impl IntoResponse> {
    let tone = MonkTone::parse(&monk_id)?;
    let category = params
        .category
        .as_deref()
        .map(ColorCategory::parse)
        .transpose()?
        .unwrap_or(ColorCategory::General);

    let colors = ColorRepo::list_for_tone(&state.pool, &tone.id(), Some(category.as_str())).await?;

    Ok(Json(DataResponse { data: colors }))
}

/// GET /api/v1/colors/suggestions?skin_tone=
pub async fn get_suggestions(Query(params): Query<SuggestionParams>) -> impl IntoResponse {
    Json(DataResponse {
        data: palette::suggestions(params.skin_tone.as_deref()),
    })
}
