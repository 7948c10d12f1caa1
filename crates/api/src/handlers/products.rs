//! Handlers for the makeup and apparel catalogs.
//!
//! Makeup search relaxes its filters when they match nothing: a tone with
//! no products is ignored, as are product types that would empty the
//! result. A valid `ogcolor` re-orders the whole result set by color
//! distance before paging.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tonematch_core::color::{self, Rgb};
use tonematch_core::error::CoreError;
use tonematch_core::monk::MonkTone;
use tonematch_core::palette;
use tonematch_core::product::{self, Pagination, DEFAULT_MAKEUP_TYPES};
use tonematch_core::season::SeasonalType;
use tonematch_db::models::product::{
    ApparelFilter, ApparelProduct, CreateApparelProduct, CreateMakeupProduct, MakeupFilter,
    MakeupProduct,
};
use tonematch_db::repositories::{ApparelProductRepo, MakeupProductRepo};
use tonematch_events::{event_types, PlatformEvent};

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, PageResponse};
use crate::state::AppState;

/// Largest accepted import batch.
pub const MAX_IMPORT_BATCH: usize = 1000;

/// Default and maximum size of each recommendation list.
const DEFAULT_RECOMMENDATION_LIMIT: i64 = 10;
const MAX_RECOMMENDATION_LIMIT: i64 = 50;

/// Apparel rows sampled before colour matching.
const APPAREL_SAMPLE_FACTOR: i64 = 5;

// ---------------------------------------------------------------------------
// Makeup
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct MakeupParams {
    pub mst: Option<String>,
    pub ogcolor: Option<String>,
    pub product_type: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Build the initial search filter from query parameters.
fn makeup_filter(params: &MakeupParams) -> MakeupFilter {
    let mst = params
        .mst
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    // A Monk id also matches products tagged with its seasonal palette; a
    // palette name is matched as-is.
    let (mst, seasonal_palette) = match mst {
        Some(raw) => match MonkTone::parse(raw) {
            Ok(tone) => (
                Some(tone.id()),
                Some(tone.seasonal_type().name().to_string()),
            ),
            Err(_) => (Some(product::normalize_mst(raw)), None),
        },
        None => (None, None),
    };

    MakeupFilter {
        mst,
        seasonal_palette,
        product_types: params
            .product_type
            .as_deref()
            .map(product::parse_csv_list)
            .unwrap_or_default(),
    }
}

/// Relax filters that match nothing.
///
/// The tone filter is checked on its own and dropped when empty. Product
/// types then narrow whatever remains, and are dropped if that leaves
/// nothing.
async fn relax_filter(state: &AppState, mut filter: MakeupFilter) -> AppResult<(MakeupFilter, i64)> {
    let product_types = std::mem::take(&mut filter.product_types);

    if filter.mst.is_some() || filter.seasonal_palette.is_some() {
        let tone_matches = MakeupProductRepo::count(&state.pool, &filter).await?;
        if tone_matches == 0 {
            tracing::debug!(mst = ?filter.mst, "No makeup for tone, dropping tone filter");
            filter.mst = None;
            filter.seasonal_palette = None;
        }
    }

    if !product_types.is_empty() {
        filter.product_types = product_types;
        let total = MakeupProductRepo::count(&state.pool, &filter).await?;
        if total > 0 {
            return Ok((filter, total));
        }
        tracing::debug!(
            product_types = ?filter.product_types,
            "No makeup for product types, dropping type filter",
        );
        filter.product_types.clear();
    }

    let total = MakeupProductRepo::count(&state.pool, &filter).await?;
    Ok((filter, total))
}

/// GET /api/v1/products/makeup?mst=&ogcolor=&product_type=&page=&limit=
pub async fn list_makeup(
    State(state): State<AppState>,
    Query(params): Query<MakeupParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = Pagination::new(params.page, params.limit)?;
    let (filter, total) = relax_filter(&state, makeup_filter(&params)).await?;

    // Unparseable colors are ignored rather than rejected.
    let target = params
        .ogcolor
        .as_deref()
        .and_then(|hex| Rgb::from_hex(hex).ok());

    let items = match target {
        Some(target) => {
            let all = MakeupProductRepo::list_filtered(&state.pool, &filter).await?;
            let ranked = product::rank_by_color(all, target, |p| p.hex.as_str());
            pagination.slice(ranked)
        }
        None => {
            MakeupProductRepo::search(&state.pool, &filter, pagination.limit, pagination.offset())
                .await?
        }
    };

    Ok(Json(PageResponse::new(items, pagination, total)))
}

/// POST /api/v1/products/makeup
///
/// Import a batch of makeup products.
pub async fn import_makeup(
    State(state): State<AppState>,
    Json(items): Json<Vec<CreateMakeupProduct>>,
) -> AppResult<impl IntoResponse> {
    check_batch_size(items.len())?;
    for (i, item) in items.iter().enumerate() {
        validate_makeup(i, item)?;
    }

    let created = MakeupProductRepo::create_batch(&state.pool, &items).await?;
    tracing::info!(count = created.len(), "Makeup products imported");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/products/makeup/types
pub async fn list_makeup_types(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut types = MakeupProductRepo::list_types(&state.pool).await?;
    if types.is_empty() {
        types = DEFAULT_MAKEUP_TYPES.iter().map(|t| t.to_string()).collect();
    }
    Ok(Json(DataResponse { data: types }))
}

// ---------------------------------------------------------------------------
// Apparel
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApparelParams {
    pub gender: Option<String>,
    /// Comma-separated base colours.
    pub colors: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/v1/products/apparel?gender=&colors=&page=&limit=
pub async fn list_apparel(
    State(state): State<AppState>,
    Query(params): Query<ApparelParams>,
) -> AppResult<impl IntoResponse> {
    let pagination = Pagination::new(params.page, params.limit)?;
    let filter = ApparelFilter {
        gender: params
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_string),
        colors: params
            .colors
            .as_deref()
            .map(product::parse_csv_list)
            .unwrap_or_default(),
    };

    let total = ApparelProductRepo::count(&state.pool, &filter).await?;
    let items =
        ApparelProductRepo::search(&state.pool, &filter, pagination.limit, pagination.offset())
            .await?;

    Ok(Json(PageResponse::new(items, pagination, total)))
}

/// POST /api/v1/products/apparel
pub async fn import_apparel(
    State(state): State<AppState>,
    Json(items): Json<Vec<CreateApparelProduct>>,
) -> AppResult<impl IntoResponse> {
    check_batch_size(items.len())?;
    for (i, item) in items.iter().enumerate() {
        require_text(i, "product_name", &item.product_name)?;
        require_text(i, "brand", &item.brand)?;
    }

    let created = ApparelProductRepo::create_batch(&state.pool, &items).await?;
    tracing::info!(count = created.len(), "Apparel products imported");

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub skin_tone: String,
    /// `makeup`, `apparel`, or absent for both.
    pub category: Option<String>,
    /// Restricts makeup to one product type.
    pub product_type: Option<String>,
    pub gender: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecommendationScope {
    Makeup,
    Apparel,
    Both,
}

impl RecommendationScope {
    fn parse(category: Option<&str>) -> Result<Self, CoreError> {
        match category.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("all") => Ok(Self::Both),
            Some("makeup") => Ok(Self::Makeup),
            Some("apparel") => Ok(Self::Apparel),
            Some(other) => Err(CoreError::Validation(format!(
                "Unknown category '{other}'. Expected makeup, apparel or all"
            ))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoredMakeup {
    #[serde(flatten)]
    pub product: MakeupProduct,
    pub compatibility_score: f64,
}

#[derive(Debug, Serialize)]
pub struct ProductRecommendations {
    pub skin_tone: MonkTone,
    pub seasonal_type: SeasonalType,
    pub makeup: Vec<ScoredMakeup>,
    pub apparel: Vec<ApparelProduct>,
}

/// Score makeup candidates for a tone, best first.
fn score_makeup(
    candidates: Vec<MakeupProduct>,
    tone: MonkTone,
    limit: usize,
) -> Vec<ScoredMakeup> {
    let season = tone.seasonal_type();
    let mut scored: Vec<ScoredMakeup> = candidates
        .into_iter()
        .map(|product| {
            let tones: Vec<MonkTone> = MonkTone::parse(&product.mst).into_iter().collect();
            let seasons: Vec<SeasonalType> = SeasonalType::from_name(&product.mst).into_iter().collect();
            let score = product::compatibility_score(product.rating, &tones, &seasons, tone, season);
            ScoredMakeup {
                product,
                compatibility_score: (score * 100.0).round() / 100.0,
            }
        })
        .collect();
    scored.sort_by(|a, b| b.compatibility_score.total_cmp(&a.compatibility_score));
    scored.truncate(limit);
    scored
}

/// GET /api/v1/products/recommendations?skin_tone=&category=&limit=
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> AppResult<impl IntoResponse> {
    let tone = MonkTone::parse(&params.skin_tone)?;
    let season = tone.seasonal_type();
    let scope = RecommendationScope::parse(params.category.as_deref())?;
    let limit = params
        .limit
        .unwrap_or(DEFAULT_RECOMMENDATION_LIMIT)
        .clamp(1, MAX_RECOMMENDATION_LIMIT);

    let makeup = if scope != RecommendationScope::Apparel {
        let product_type = params
            .product_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let candidates = MakeupProductRepo::list_candidates(
            &state.pool,
            &tone.id(),
            season.name(),
            product_type,
            limit * 3,
        )
        .await?;
        score_makeup(candidates, tone, limit as usize)
    } else {
        Vec::new()
    };

    let apparel = if scope != RecommendationScope::Makeup {
        let suited = palette::recommended_colors(season);
        let sample = ApparelProductRepo::random_sample(
            &state.pool,
            params.gender.as_deref(),
            limit * APPAREL_SAMPLE_FACTOR,
        )
        .await?;
        sample
            .into_iter()
            .filter(|p| {
                p.base_colour.as_deref().is_some_and(|base| {
                    product::matches_base_colour(base, suited.iter().map(|c| c.name.as_str()))
                })
            })
            .take(limit as usize)
            .collect()
    } else {
        Vec::new()
    };

    state.event_bus.publish(
        PlatformEvent::new(event_types::PRODUCTS_RECOMMENDED).with_payload(json!({
            "skin_tone": tone,
            "seasonal_type": season,
            "makeup_count": makeup.len(),
            "apparel_count": apparel.len(),
        })),
    );

    Ok(Json(DataResponse {
        data: ProductRecommendations {
            skin_tone: tone,
            seasonal_type: season,
            makeup,
            apparel,
        },
    }))
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

fn check_batch_size(len: usize) -> Result<(), CoreError> {
    if len == 0 {
        return Err(CoreError::Validation("Import batch must not be empty".into()));
    }
    if len > MAX_IMPORT_BATCH {
        return Err(CoreError::Validation(format!(
            "Import batch must contain at most {MAX_IMPORT_BATCH} items, got {len}"
        )));
    }
    Ok(())
}

fn require_text(index: usize, field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "item {index}: {field} must not be empty"
        )));
    }
    Ok(())
}

fn validate_makeup(index: usize, item: &CreateMakeupProduct) -> Result<(), AppError> {
    require_text(index, "product_name", &item.product_name)?;
    require_text(index, "brand", &item.brand)?;
    require_text(index, "product_type", &item.product_type)?;

    if let Some(hex) = item.hex.as_deref().filter(|h| !h.is_empty()) {
        if !color::is_valid_hex(hex) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "item {index}: invalid hex color '{hex}'"
            ))));
        }
    }
    if let Some(rating) = item.rating {
        if !(0.0..=5.0).contains(&rating) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "item {index}: rating must be between 0 and 5, got {rating}"
            ))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn makeup(id: i64, mst: &str, rating: Option<f64>) -> MakeupProduct {
        MakeupProduct {
            id,
            product_name: format!("Product {id}"),
            brand: "Brand".into(),
            price: String::new(),
            image_url: String::new(),
            mst: mst.into(),
            hex: String::new(),
            description: String::new(),
            product_type: "Lipstick".into(),
            rating,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn filter_expands_monk_id_to_its_palette() {
        let params = MakeupParams {
            mst: Some("Monk 5".into()),
            ogcolor: None,
            product_type: Some("Lipstick, Blush".into()),
            page: None,
            limit: None,
        };
        let filter = makeup_filter(&params);
        assert_eq!(filter.mst.as_deref(), Some("Monk05"));
        assert_eq!(
            filter.seasonal_palette.as_deref(),
            Some(MonkTone::Monk05.seasonal_type().name())
        );
        assert_eq!(filter.product_types, vec!["Lipstick", "Blush"]);
    }

    #[test]
    fn filter_passes_palette_names_through() {
        let params = MakeupParams {
            mst: Some(" Deep Autumn ".into()),
            ogcolor: None,
            product_type: None,
            page: None,
            limit: None,
        };
        let filter = makeup_filter(&params);
        assert_eq!(filter.mst.as_deref(), Some("Deep Autumn"));
        assert!(filter.seasonal_palette.is_none());
        assert!(filter.product_types.is_empty());
    }

    #[test]
    fn scope_parsing() {
        assert_eq!(RecommendationScope::parse(None).unwrap(), RecommendationScope::Both);
        assert_eq!(
            RecommendationScope::parse(Some("Makeup")).unwrap(),
            RecommendationScope::Makeup
        );
        assert_matches!(
            RecommendationScope::parse(Some("shoes")),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn makeup_scoring_prefers_matching_tone() {
        let tone = MonkTone::Monk05;
        let candidates = vec![
            makeup(1, "Monk09", Some(5.0)),
            makeup(2, "Monk05", Some(4.0)),
            makeup(3, "", None),
        ];
        let scored = score_makeup(candidates, tone, 2);
        assert_eq!(scored.len(), 2);
        // Unclaimed and unrated products count as fully compatible.
        assert_eq!(scored[0].product.id, 3);
        assert_eq!(scored[1].product.id, 2);
    }

    #[test]
    fn import_validation() {
        assert_matches!(check_batch_size(0), Err(CoreError::Validation(_)));
        assert!(check_batch_size(1).is_ok());
        assert_matches!(
            check_batch_size(MAX_IMPORT_BATCH + 1),
            Err(CoreError::Validation(_))
        );

        let item = CreateMakeupProduct {
            product_name: "Velvet".into(),
            brand: "Acme".into(),
            price: None,
            image_url: None,
            mst: None,
            hex: Some("not-hex".into()),
            description: None,
            product_type: "Lipstick".into(),
            rating: None,
        };
        assert_matches!(validate_makeup(0, &item), Err(AppError::Core(CoreError::Validation(_))));
    }
}
