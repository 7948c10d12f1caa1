//! Integration tests for analysis, feedback and event persistence.

use image::RgbImage;
use sqlx::PgPool;
use tonematch_core::analysis;
use tonematch_core::feedback;
use tonematch_db::models::analysis::CreateAnalysis;
use tonematch_db::models::feedback::NewFeedback;
use tonematch_db::repositories::{AnalysisRepo, EventRepo, FeedbackRepo};

// ---------------------------------------------------------------------------
// Test: Analyses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_analysis(pool: PgPool) {
    let image = RgbImage::from_pixel(100, 100, image::Rgb([215, 189, 150]));
    let result = analysis::analyze_image(&image);
    let input = CreateAnalysis::from_result(&result, "abc123", Some("session-1".into()));

    let stored = AnalysisRepo::create(&pool, &input).await.unwrap();
    assert_eq!(stored.monk_skin_tone, "Monk05");
    assert_eq!(stored.analysis_method, "precision");
    assert_eq!(stored.seasonal_type, "Soft Autumn");
    assert_eq!(stored.undertone, "neutral");
    assert_eq!(stored.regions_analyzed.len(), 5);
    assert!(stored.region_statistics.get("forehead").is_some());

    let found = AnalysisRepo::find_by_id(&pool, stored.id).await.unwrap().unwrap();
    assert_eq!(found.image_fingerprint, "abc123");
    assert_eq!(found.session_id.as_deref(), Some("session-1"));

    assert!(AnalysisRepo::find_by_id(&pool, stored.id + 1000)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_recent_analyses_newest_first(pool: PgPool) {
    let image = RgbImage::from_pixel(4, 4, image::Rgb([41, 36, 32]));
    let result = analysis::analyze_image(&image);
    for i in 0..3 {
        let input = CreateAnalysis::from_result(&result, format!("fp-{i}"), None);
        AnalysisRepo::create(&pool, &input).await.unwrap();
    }

    let rows = AnalysisRepo::list_recent(&pool, 2, 0).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].image_fingerprint, "fp-2");
    assert_eq!(rows[1].image_fingerprint, "fp-1");
}

// ---------------------------------------------------------------------------
// Test: Feedback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_feedback_round_trip(pool: PgPool) {
    let rating = feedback::validate("rating", "product", "42", Some(4), None).unwrap();
    let comment = feedback::validate("comment", "color", "#ff0000", None, Some("great")).unwrap();

    FeedbackRepo::create(
        &pool,
        &NewFeedback {
            feedback: rating,
            session_id: None,
        },
    )
    .await
    .unwrap();
    let stored = FeedbackRepo::create(
        &pool,
        &NewFeedback {
            feedback: comment,
            session_id: Some("s".into()),
        },
    )
    .await
    .unwrap();
    assert_eq!(stored.feedback_type, "comment");
    assert_eq!(stored.comment.as_deref(), Some("great"));

    let all = FeedbackRepo::list_recent(&pool, None, 10, 0).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, stored.id);

    let products = FeedbackRepo::list_recent(&pool, Some("product"), 10, 0)
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].rating, Some(4));
}

// ---------------------------------------------------------------------------
// Test: Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insert_and_list_events(pool: PgPool) {
    let payload = serde_json::json!({ "monk_skin_tone": "Monk05" });
    let id = EventRepo::insert(&pool, "skin_tone.analyzed", Some("fp"), &payload)
        .await
        .unwrap();
    EventRepo::insert(&pool, "feedback.received", None, &serde_json::json!({}))
        .await
        .unwrap();

    let recent = EventRepo::list_recent(&pool, 10, 0).await.unwrap();
    assert_eq!(recent.len(), 2);

    let analyzed = EventRepo::list_by_type(&pool, "skin_tone.analyzed", 10)
        .await
        .unwrap();
    assert_eq!(analyzed.len(), 1);
    assert_eq!(analyzed[0].id, id);
    assert_eq!(analyzed[0].payload["monk_skin_tone"], "Monk05");
}
