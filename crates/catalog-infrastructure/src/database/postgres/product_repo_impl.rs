// ============================================================================
// Catalog Infrastructure - PostgreSQL Product Repository
// File: crates/catalog-infrastructure/src/database/postgres/product_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use tracing::{error, info};

use catalog_core::domain::{NewProduct, Product, ProductUpdate};
use catalog_core::error::DomainError;
use catalog_core::repositories::ProductRepository;
use catalog_shared::Pagination;

use super::{db_error, is_foreign_key_violation, is_unique_violation, prefix_pattern};

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    model_no: String,
    item_code: Option<String>,
    title: String,
    gender: Option<String>,
    lens_width: f32,
    nose_bridge: f32,
    temple_length: f32,
    sku_count: i64,
    series_id: Option<i64>,
    series_name: String,
    category_id: i64,
    category_name: String,
    brand_id: Option<i64>,
    brand_name: String,
    frame_material_id: i64,
    frame_material_name: String,
    description: String,
    image_urls: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            model_no: row.model_no,
            item_code: row.item_code,
            title: row.title,
            gender: row.gender,
            lens_width: row.lens_width,
            nose_bridge: row.nose_bridge,
            temple_length: row.temple_length,
            sku_count: row.sku_count,
            series_id: row.series_id,
            series_name: row.series_name,
            category_id: row.category_id,
            category_name: row.category_name,
            brand_id: row.brand_id,
            brand_name: row.brand_name,
            frame_material_id: row.frame_material_id,
            frame_material_name: row.frame_material_name,
            description: row.description,
            image_urls: row.image_urls,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Live products with their joined names and ordered image file names.
const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.model_no, p.item_code, p.title, p.gender,
           p.lens_width, p.nose_bridge, p.temple_length, p.sku_count,
           p.series_id, COALESCE(s.name, '') AS series_name,
           p.category_id, COALESCE(c.name, '') AS category_name,
           p.brand_id, COALESCE(b.name, '') AS brand_name,
           p.frame_material_id, COALESCE(fm.name, '') AS frame_material_name,
           p.description,
           COALESCE(
               (SELECT array_agg(pi.file_name::TEXT ORDER BY pi.position, pi.id)
                FROM product_images pi WHERE pi.product_id = p.id),
               '{}'::TEXT[]
           ) AS image_urls,
           p.created_at, p.updated_at
    FROM products p
    LEFT JOIN series s ON s.id = p.series_id
    LEFT JOIN categories c ON c.id = p.category_id
    LEFT JOIN brands b ON b.id = p.brand_id
    LEFT JOIN frame_materials fm ON fm.id = p.frame_material_id
    WHERE p.deleted_at IS NULL
"#;

fn write_error(item_code: Option<&str>) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::ItemCodeAlreadyExists(item_code.unwrap_or_default().to_string())
        } else if is_foreign_key_violation(&e) {
            DomainError::ReferenceNotFound("product reference".into())
        } else {
            error!("Database error writing product: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

/// Appends image rows after the product's current last position.
async fn add_images(conn: &mut PgConnection, product_id: i64, file_names: &[String]) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO product_images (product_id, file_name, position)
        SELECT $1, f.name,
               f.ord + COALESCE((SELECT MAX(position) FROM product_images WHERE product_id = $1), 0)
        FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS f(name, ord)
        ON CONFLICT (product_id, file_name) DO NOTHING
        "#,
    )
    .bind(product_id)
    .bind(file_names)
    .execute(&mut *conn)
    .await
    .map_err(db_error("storing product images"))?;
    Ok(())
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Product>, u64), DomainError> {
        let pattern = prefix_pattern(query);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE deleted_at IS NULL AND (item_code ILIKE $1 OR model_no ILIKE $1)
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting products"))?;

        let sql = format!(
            "{PRODUCT_SELECT} AND (p.item_code ILIKE $1 OR p.model_no ILIKE $1) \
             ORDER BY p.created_at DESC, p.id DESC LIMIT $2 OFFSET $3"
        );
        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(&pattern)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("paging products"))?;

        Ok((rows.into_iter().map(Product::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DomainError> {
        let sql = format!("{PRODUCT_SELECT} AND p.id = $1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding product by id"))?;

        Ok(row.map(Product::from))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting product insert"))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (
                model_no, item_code, title, gender, lens_width, nose_bridge, temple_length,
                sku_count, series_id, category_id, brand_id, frame_material_id, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING id
            "#,
        )
        .bind(&product.model_no)
        .bind(&product.item_code)
        .bind(&product.title)
        .bind(&product.gender)
        .bind(product.lens_width)
        .bind(product.nose_bridge)
        .bind(product.temple_length)
        .bind(product.sku_count)
        .bind(product.series_id)
        .bind(product.category_id)
        .bind(product.brand_id)
        .bind(product.frame_material_id)
        .bind(&product.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error(product.item_code.as_deref()))?;

        add_images(&mut tx, id, &product.image_urls).await?;
        tx.commit().await.map_err(db_error("committing product insert"))?;
        info!("Product row inserted: {}", id);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::InternalError(format!("product {} vanished after insert", id)))
    }

    async fn update(&self, update: &ProductUpdate) -> Result<Option<Product>, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting product update"))?;

        let updated: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET model_no = $2, item_code = $3, title = $4, gender = $5, lens_width = $6,
                nose_bridge = $7, temple_length = $8, sku_count = $9, series_id = $10,
                category_id = $11, brand_id = $12, frame_material_id = $13, description = $14,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id
            "#,
        )
        .bind(update.id)
        .bind(&update.model_no)
        .bind(&update.item_code)
        .bind(&update.title)
        .bind(&update.gender)
        .bind(update.lens_width)
        .bind(update.nose_bridge)
        .bind(update.temple_length)
        .bind(update.sku_count)
        .bind(update.series_id)
        .bind(update.category_id)
        .bind(update.brand_id)
        .bind(update.frame_material_id)
        .bind(&update.description)
        .fetch_optional(&mut *tx)
        .await
        .map_err(write_error(update.item_code.as_deref()))?;

        let Some(id) = updated else {
            return Ok(None);
        };

        if !update.deleted_image_urls.is_empty() {
            sqlx::query("DELETE FROM product_images WHERE product_id = $1 AND file_name = ANY($2)")
                .bind(id)
                .bind(&update.deleted_image_urls)
                .execute(&mut *tx)
                .await
                .map_err(db_error("removing product images"))?;
        }
        add_images(&mut tx, id, &update.image_urls).await?;
        tx.commit().await.map_err(db_error("committing product update"))?;

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE products SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting product"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE products SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("batch deleting products"))?;

        Ok(result.rows_affected())
    }
}
