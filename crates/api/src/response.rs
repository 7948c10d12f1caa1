//! Shared response envelope types for API handlers.
//!
//! Single resources and unpaged lists use `{ "data": ... }`. Catalog
//! listings add page metadata through [`PageResponse`].

use serde::Serialize;
use tonematch_core::product::Pagination;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Paged listing envelope.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PageResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination, total_items: i64) -> Self {
        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total_items,
            total_pages: pagination.total_pages(total_items),
        }
    }
}
