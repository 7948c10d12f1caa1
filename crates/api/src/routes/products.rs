//! Route definitions for the product catalogs.

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Product routes mounted at `/products`.
///
/// ```text
/// GET  /makeup            -> list_makeup
/// POST /makeup            -> import_makeup
/// GET  /makeup/types      -> list_makeup_types
/// GET  /apparel           -> list_apparel
/// POST /apparel           -> import_apparel
/// GET  /recommendations   -> get_recommendations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/makeup",
            get(products::list_makeup).post(products::import_makeup),
        )
        .route("/makeup/types", get(products::list_makeup_types))
        .route(
            "/apparel",
            get(products::list_apparel).post(products::import_apparel),
        )
        .route("/recommendations", get(products::get_recommendations))
}
