//! Repository for the `apparel_products` table.

use sqlx::PgPool;

use crate::models::product::{ApparelFilter, ApparelProduct, CreateApparelProduct};

/// Column list for `apparel_products` queries.
const COLUMNS: &str = "\
    id, product_name, brand, price, image_url, product_type, gender, \
    base_colour, master_category, created_at";

/// `$1` gender, `$2` lower-cased base colours.
const FILTER: &str = "\
    ($1::text IS NULL OR lower(gender) = lower($1)) \
    AND (cardinality($2::text[]) = 0 OR lower(base_colour) = ANY($2::text[]))";

fn lowered_colors(filter: &ApparelFilter) -> Vec<String> {
    filter.colors.iter().map(|c| c.trim().to_lowercase()).collect()
}

pub struct ApparelProductRepo;

impl ApparelProductRepo {
    /// Import many products in one statement.
    pub async fn create_batch(
        pool: &PgPool,
        items: &[CreateApparelProduct],
    ) -> Result<Vec<ApparelProduct>, sqlx::Error> {
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
        let types: Vec<&str> = items
            .iter()
            .map(|p| p.product_type.as_deref().unwrap_or("Apparel"))
            .collect();
        let genders: Vec<Option<&str>> = items.iter().map(|p| p.gender.as_deref()).collect();
        let colours: Vec<Option<&str>> = items.iter().map(|p| p.base_colour.as_deref()).collect();
        let categories: Vec<Option<&str>> =
            items.iter().map(|p| p.master_category.as_deref()).collect();

        let query = format!(
            "INSERT INTO apparel_products \
                (product_name, brand, price, image_url, product_type, gender, base_colour, master_category) \
             SELECT * FROM UNNEST($1::text[], $2::text[], $3::text[], $4::text[], $5::text[], \
                                  $6::text[], $7::text[], $8::text[]) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApparelProduct>(&query)
            .bind(&names)
            .bind(&brands)
            .bind(&prices)
            .bind(&images)
            .bind(&types)
            .bind(&genders)
            .bind(&colours)
            .bind(&categories)
            .fetch_all(pool)
            .await
    }

    /// One page of matching products, ordered by id.
    pub async fn search(
        pool: &PgPool,
        filter: &ApparelFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ApparelProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM apparel_products WHERE {FILTER} \
             ORDER BY id LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ApparelProduct>(&query)
            .bind(filter.gender.as_deref())
            .bind(lowered_colors(filter))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: &ApparelFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM apparel_products WHERE {FILTER}");
        sqlx::query_scalar(&query)
            .bind(filter.gender.as_deref())
            .bind(lowered_colors(filter))
            .fetch_one(pool)
            .await
    }

    /// Random selection of products with a known base colour.
    pub async fn random_sample(
        pool: &PgPool,
        gender: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ApparelProduct>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM apparel_products \
             WHERE base_colour IS NOT NULL \
               AND ($1::text IS NULL OR lower(gender) = lower($1)) \
             ORDER BY random() LIMIT $2"
        );
        sqlx::query_as::<_, ApparelProduct>(&query)
            .bind(gender)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
