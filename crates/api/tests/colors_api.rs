//! Integration tests for the color endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;
use tonematch_db::repositories::ColorRepo;

// ---------------------------------------------------------------------------
// Test: the Monk scale lists ten tones with palette metadata
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn skin_tones_lists_the_scale(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/colors/skin-tones").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let tones = json["data"].as_array().unwrap();
    assert_eq!(tones.len(), 10);
    assert_eq!(tones[0]["id"], "Monk01");
    assert_eq!(tones[4]["hex"], "#d7bd96");
    assert_eq!(tones[4]["seasonal_type"], "Soft Autumn");
    assert_eq!(tones[4]["undertone"], "neutral");
}

// ---------------------------------------------------------------------------
// Test: recommendations resolve by tone, by hex, or fall back
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recommendations_resolve_or_fall_back(pool: PgPool) {
    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/colors/recommendations?skin_tone=Monk%205",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["monk_skin_tone"], "Monk05");
    assert_eq!(json["data"]["seasonal_type"], "Soft Autumn");
    assert!(!json["data"]["colors_that_suit"].as_array().unwrap().is_empty());

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/colors/recommendations?hex_color=%23292420",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["monk_skin_tone"], "Monk10");

    let response = get(
        common::build_test_app(pool),
        "/api/v1/colors/recommendations?skin_tone=unknown",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["monk_skin_tone"].is_null());
    assert!(json["data"]["colors_to_avoid"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: palette rows come from the seeded table
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn palette_reads_seeded_rows(pool: PgPool) {
    ColorRepo::seed_defaults(&pool).await.unwrap();

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/colors/palette/monk03",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r["suitable_skin_tone"] == "Monk03"));

    // Recommended colors come before avoided ones.
    let first_avoid = rows.iter().position(|r| r["is_avoid"] == true);
    if let Some(i) = first_avoid {
        assert!(rows[i..].iter().all(|r| r["is_avoid"] == true));
    }

    assert!(rows.iter().all(|r| r["category"] == "general"));

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/colors/palette/Monk03?category=general",
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), rows.len());

    for category in ["clothing", "makeup", "accessories"] {
        let response = get(
            common::build_test_app(pool.clone()),
            &format!("/api/v1/colors/palette/Monk03?category={category}"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let subset = json["data"].as_array().unwrap();
        assert!(!subset.is_empty(), "no {category} colors for Monk03");
        assert!(subset.iter().all(|r| r["category"] == category));
    }

    let response = get(
        common::build_test_app(pool.clone()),
        "/api/v1/colors/palette/Monk03?category=Makeup",
    )
    .await;
    let json = body_json(response).await;
    assert!(json["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["color_name"] == "Coral"));

    let response = get(
        common::build_test_app(pool),
        "/api/v1/colors/palette/Monk03?category=shoes",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: invalid Monk id is a validation error
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn palette_rejects_unknown_tone(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/colors/palette/Monk11").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: suggestions filter by substring
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn suggestions_are_filtered(pool: PgPool) {
    let all = body_json(get(common::build_test_app(pool.clone()), "/api/v1/colors/suggestions").await).await;
    let all = all["data"].as_array().unwrap().len();
    assert!(all > 0);

    let none = body_json(
        get(
            common::build_test_app(pool),
            "/api/v1/colors/suggestions?skin_tone=zzzz",
        )
        .await,
    )
    .await;
    assert!(none["data"].as_array().unwrap().is_empty());
}
