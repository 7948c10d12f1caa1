//! Repository for the `makeup_products` table.

use sqlx::PgPool;
use tonematch_core::product::normalize_mst;

use crate::models::product::{CreateMakeupProduct, MakeupFilter, MakeupProduct};

/// Column list for `makeup_products` queries.
const COLUMNS: &str = "\
    id, product_name, brand, price, image_url, mst, hex, description, \
    product_type, rating, created_at";

/// Shared WHERE clause. `$1` is the Monk id, `$2` the seasonal palette
/// name and `$3` the product type patterns.
const FILTER: &str = "\
    ($1::text IS NULL OR lower(mst) = lower($1) \
        OR ($2::text IS NOT NULL AND lower(mst) = lower($2))) \
    AND (cardinality($3::text[]) = 0 OR product_type ILIKE ANY($3::text[]))";

fn type_patterns(filter: &MakeupFilter) -> Vec<String> {
    filter
        .product_types
        .iter()
        .map(|t| format!("%{}%", escape_like(t)))
        .collect()
}

/// Escape `%`, `_` and `\` for use inside an ILIKE pattern.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub struct MakeupProductRepo;

impl MakeupProductRepo {
    /// Import many products in one statement.
    ///
    /// Monk tags are stored in canonical form (`"Monk 3"` becomes `"Monk03"`)
    /// so they compare equal to normalized filters.
    pub async fn create_batch(
        pool: &PgPool,
        items: &[CreateMakeupProduct],
    ) -> Result<Vec<MakeupProduct>, sqlx::Error> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let names: Vec<&str> = items.iter().map(|p| p.product_name.as_str()).collect();
        let brands: Vec<&str> = items.iter().map(|p| p.brand.as_str()).collect();
        let prices: Vec<&str> = items.iter().map(|p| p.price.as_deref().unwrap_or("")).collect();
        let images: Vec<&str> = items
            .iter()
            .map(|p| p.image_url.as_deref().unwrap_or(""))
            .collect();
        let msts: Vec<String> = items
            .iter()
            .map(|p| normalize_mst(p.mst.as_deref().unwrap_or("")))
            .collect();
        let hexes: Vec<&str> = items.iter().map(|p| p.hex.as_deref().unwrap_or("")).collect();
        let descriptions: Vec<&str> = items
            .iter()
            .map(|p| p.description.as_deref().unwrap_or(""))
            .collect();
        let types: Vec<&str> = items.iter().map(|p| p.product_type.as_str()).collect();
        let ratings: Vec<Option<f64>> = items.iter().map(|p| p.rating).collect();

        let query = format!(
            "INSERT INTO makeup_products \
                (product_name, brand, price, image_url, mst, hex, description, product_type, rating) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[], \
                                  $6::text[], $7::text[], $8::text[], $9::float8[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MakeupProduct>(&query)
            .bind(&names)
            .bind(&brands)
            .bind(&prices)
            .bind(&images)
            .bind(&msts)
            .bind(&hexes)
            .bind(&descriptions)
            .bind(&types)
            .bind(&ratings)
            .fetch_all(pool)
            .await
    }

    /// One page of matching products, ordered by id.
    pub async fn search(
        pool: &PgPool,
        filter: &MakeupFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MakeupProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM makeup_products WHERE {FILTER} \
             ORDER BY id LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MakeupProduct>(&query)
            .bind(filter.mst.as_deref())
            .bind(filter.seasonal_palette.as_deref())
            .bind(type_patterns(filter))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Every matching product, for callers that rank in memory.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &MakeupFilter,
    ) -> Result<Vec<MakeupProduct>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM makeup_products WHERE {FILTER} ORDER BY id");
        sqlx::query_as::<_, MakeupProduct>(&query)
            .bind(filter.mst.as_deref())
            .bind(filter.seasonal_palette.as_deref())
            .bind(type_patterns(filter))
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &MakeupFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM makeup_products WHERE {FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.mst.as_deref())
            .bind(filter.seasonal_palette.as_deref())
            .bind(type_patterns(filter))
            .fetch_one(pool)
            .await
    }

    /// Products aimed at a tone or its seasonal palette, plus products
    /// that make no claim, up to `limit` rows.
    pub async fn list_candidates(
        pool: &PgPool,
        monk_id: &str,
        seasonal_palette: &str,
        product_type: Option<&str>,
        limit: i64,
    ) -> Result<Vec<MakeupProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM makeup_products \
             WHERE (lower(mst) IN (lower($1), lower($2)) OR mst = '') \
               AND ($3::text IS NULL OR product_type ILIKE $3) \
             ORDER BY rating DESC NULLS LAST, id \
             LIMIT $4"
        );
        sqlx::query_as::<_, MakeupProduct>(&query)
            .bind(monk_id)
            .bind(seasonal_palette)
            .bind(product_type)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Distinct product types, sorted alphabetically.
    pub async fn list_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT DISTINCT product_type FROM makeup_products \
             WHERE product_type <> '' ORDER BY product_type",
        )
        .fetch_all(pool)
        .await
    }
}
