//! Makeup and apparel catalog models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tonematch_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Makeup
// ---------------------------------------------------------------------------

/// A row from the `makeup_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MakeupProduct {
    pub id: DbId,
    pub product_name: String,
    pub brand: String,
    pub price: String,
    pub image_url: String,
    /// Monk id (`Monk03`) or seasonal palette name the product targets;
    /// empty when it makes no claim.
    pub mst: String,
    pub hex: String,
    pub description: String,
    pub product_type: String,
    pub rating: Option<f64>,
    pub created_at: Timestamp,
}

/// DTO for importing a makeup product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMakeupProduct {
    pub product_name: String,
    pub brand: String,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub mst: Option<String>,
    pub hex: Option<String>,
    pub description: Option<String>,
    pub product_type: String,
    pub rating: Option<f64>,
}

/// Filters for makeup search. Empty fields are not applied.
#[derive(Debug, Clone, Default)]
pub struct MakeupFilter {
    /// Canonical Monk id, compared case-insensitively.
    pub mst: Option<String>,
    /// Seasonal palette name accepted as an alternative to `mst`.
    pub seasonal_palette: Option<String>,
    /// Product types, matched as case-insensitive substrings.
    pub product_types: Vec<String>,
}

// ---------------------------------------------------------------------------
// Apparel
// ---------------------------------------------------------------------------

/// A row from the `apparel_products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApparelProduct {
    pub id: DbId,
    pub product_name: String,
    pub brand: String,
    pub price: String,
    pub image_url: String,
    pub product_type: String,
    pub gender: Option<String>,
    pub base_colour: Option<String>,
    pub master_category: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for importing an apparel product.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateApparelProduct {
    pub product_name: String,
    pub brand: String,
    pub price: Option<String>,
    pub image_url: Option<String>,
    pub product_type: Option<String>,
    pub gender: Option<String>,
    pub base_colour: Option<String>,
    pub master_category: Option<String>,
}

/// Filters for apparel search.
#[derive(Debug, Clone, Default)]
pub struct ApparelFilter {
    pub gender: Option<String>,
    /// Base colours, compared case-insensitively.
    pub colors: Vec<String>,
}
