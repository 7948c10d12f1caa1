//! Handlers for skin tone analysis.
//!
//! Uploads go through a cache keyed by the image fingerprint. Fresh
//! results are persisted and announced on the event bus; when the request
//! carries a `?session=` tag, progress is forwarded to that WebSocket
//! session by the notification router.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use tonematch_core::analysis::{self, SkinToneAnalysis};
use tonematch_core::error::CoreError;
use tonematch_core::hashing;
use tonematch_core::progress::AnalysisStage;
use tonematch_core::types::DbId;
use tonematch_db::models::analysis::CreateAnalysis;
use tonematch_db::repositories::AnalysisRepo;
use tonematch_events::{event_types, EventBus, PlatformEvent};

use crate::error::{AppError, AppResult};
use crate::query::{PaginationParams, SessionParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the photo.
const FILE_FIELD: &str = "file";

/// What the analysis cache holds per fingerprint.
#[derive(Debug, Clone)]
pub struct CachedAnalysis {
    pub analysis_id: DbId,
    pub result: SkinToneAnalysis,
}

/// Body returned by the upload endpoint.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: DbId,
    pub image_fingerprint: String,
    pub cached: bool,
    pub processing_time_ms: u64,
    #[serde(flatten)]
    pub result: SkinToneAnalysis,
}

/// Publishes progress for one upload. A no-op without a session.
#[derive(Clone)]
struct ProgressReporter {
    bus: Arc<EventBus>,
    session_id: Option<String>,
    fingerprint: String,
}

impl ProgressReporter {
    fn emit(&self, stage: AnalysisStage) {
        if self.session_id.is_none() {
            return;
        }
        self.bus.publish(
            PlatformEvent::new(event_types::ANALYSIS_PROGRESS)
                .with_correlation(self.fingerprint.clone())
                .with_session(self.session_id.clone())
                .with_payload(json!({
                    "stage": stage,
                    "percent": stage.percent(),
                    "message": stage.message(),
                })),
        );
    }
}

fn publish_failed(
    bus: &EventBus,
    session_id: Option<String>,
    fingerprint: Option<&str>,
    error: &AppError,
) {
    let mut event = PlatformEvent::new(event_types::ANALYSIS_FAILED)
        .with_session(session_id)
        .with_payload(json!({ "error": error.to_string() }));
    if let Some(fp) = fingerprint {
        event = event.with_correlation(fp);
    }
    bus.publish(event);
}

/// POST /api/v1/analysis?session=
///
/// Analyze an uploaded photo sent as the multipart `file` field.
pub async fn analyze_upload(
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let started = Instant::now();
    let session_id = params.session_id();

    let data = match read_image_field(multipart).await {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected analysis upload");
            publish_failed(&state.event_bus, session_id, None, &e);
            return Err(e);
        }
    };
    let fingerprint = hashing::image_fingerprint(&data);
    let reporter = ProgressReporter {
        bus: Arc::clone(&state.event_bus),
        session_id: session_id.clone(),
        fingerprint: fingerprint.clone(),
    };
    reporter.emit(AnalysisStage::Received);

    match run_analysis(&state, data, fingerprint.clone(), session_id.clone(), &reporter, started)
        .await
    {
        Ok((status, response)) => Ok((status, Json(DataResponse { data: response }))),
        Err(e) => {
            tracing::warn!(fingerprint = %fingerprint, error = %e, "Skin tone analysis failed");
            publish_failed(&state.event_bus, session_id, Some(&fingerprint), &e);
            Err(e)
        }
    }
}

/// Pull the image bytes out of the form, rejecting non-image uploads.
async fn read_image_field(mut multipart: Multipart) -> AppResult<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let is_image = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(AppError::BadRequest("File must be an image".into()));
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(data.to_vec());
    }
    Err(AppError::BadRequest(format!(
        "Missing required '{FILE_FIELD}' field"
    )))
}

async fn run_analysis(
    state: &AppState,
    data: Vec<u8>,
    fingerprint: String,
    session_id: Option<String>,
    reporter: &ProgressReporter,
    started: Instant,
) -> AppResult<(StatusCode, AnalysisResponse)> {
    let cache_key = hashing::analysis_cache_key(&data);

    if let Some(hit) = state.analysis_cache.get(&cache_key).await {
        tracing::info!(
            fingerprint = %fingerprint,
            analysis_id = hit.analysis_id,
            "Returning cached skin tone analysis",
        );
        reporter.emit(AnalysisStage::Completed);
        let response = AnalysisResponse {
            analysis_id: hit.analysis_id,
            image_fingerprint: fingerprint,
            cached: true,
            processing_time_ms: elapsed_ms(started),
            result: hit.result,
        };
        publish_analyzed(&state.event_bus, session_id, &response);
        return Ok((StatusCode::OK, response));
    }

    let max_dimension = state.config.max_image_dimension;
    let progress = reporter.clone();
    let result = tokio::task::spawn_blocking(move || -> Result<SkinToneAnalysis, CoreError> {
        let image = analysis::decode_image(&data, max_dimension)?;
        progress.emit(AnalysisStage::Decoded);
        Ok(analysis::analyze_image_with_progress(&image, |stage| {
            progress.emit(stage)
        }))
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Analysis task failed: {e}")))??;

    let input = CreateAnalysis::from_result(&result, fingerprint.clone(), session_id.clone());
    let stored = AnalysisRepo::create(&state.pool, &input).await?;

    state
        .analysis_cache
        .insert(
            cache_key,
            CachedAnalysis {
                analysis_id: stored.id,
                result: result.clone(),
            },
        )
        .await;

    reporter.emit(AnalysisStage::Completed);

    tracing::info!(
        analysis_id = stored.id,
        fingerprint = %fingerprint,
        monk_skin_tone = %result.monk_skin_tone,
        method = result.analysis_method.as_str(),
        confidence = result.confidence,
        "Skin tone analyzed",
    );

    let response = AnalysisResponse {
        analysis_id: stored.id,
        image_fingerprint: fingerprint,
        cached: false,
        processing_time_ms: elapsed_ms(started),
        result,
    };
    publish_analyzed(&state.event_bus, session_id, &response);
    Ok((StatusCode::CREATED, response))
}

fn publish_analyzed(bus: &EventBus, session_id: Option<String>, response: &AnalysisResponse) {
    let payload = serde_json::to_value(response).unwrap_or_else(|_| json!({}));
    bus.publish(
        PlatformEvent::new(event_types::SKIN_TONE_ANALYZED)
            .with_correlation(response.image_fingerprint.clone())
            .with_session(session_id)
            .with_payload(payload),
    );
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// GET /api/v1/analysis
///
/// Most recent stored analyses first.
pub async fn list_analyses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let rows = AnalysisRepo::list_recent(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/analysis/method
pub async fn get_method() -> impl IntoResponse {
    Json(DataResponse {
        data: analysis::method_info(),
    })
}

/// GET /api/v1/analysis/{id}
pub async fn get_analysis(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = AnalysisRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Analysis",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: row }))
}
