// ============================================================================
// Catalog Infrastructure - PostgreSQL Storefront Catalog Queries
// File: crates/catalog-infrastructure/src/database/postgres/catalog_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use catalog_core::domain::{CatalogFilter, Facet, ProductCard, SeriesCard};
use catalog_core::error::DomainError;
use catalog_core::repositories::CatalogRepository;
use catalog_shared::Pagination;

use super::db_error;

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct FacetRow {
    id: i64,
    name: String,
    product_count: i64,
    series_count: i64,
}

impl From<FacetRow> for Facet {
    fn from(row: FacetRow) -> Self {
        Facet {
            id: row.id,
            name: row.name,
            product_count: row.product_count,
            series_count: row.series_count,
        }
    }
}

#[derive(Debug, FromRow)]
struct SeriesCardRow {
    series_id: i64,
    series_name: String,
    is_new_design: bool,
    pdf_url: String,
    material_name: String,
    models_count: i64,
    skus_count: i64,
}

impl From<SeriesCardRow> for SeriesCard {
    fn from(row: SeriesCardRow) -> Self {
        SeriesCard {
            series_id: row.series_id,
            series_name: row.series_name,
            is_new_design: row.is_new_design,
            pdf_url: row.pdf_url,
            material_name: row.material_name,
            models_count: row.models_count,
            skus_count: row.skus_count,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductCardRow {
    id: i64,
    model_no: String,
    image_url: Option<String>,
    lens_width: f32,
    nose_bridge: f32,
    temple_length: f32,
    frame_material: String,
}

impl From<ProductCardRow> for ProductCard {
    fn from(row: ProductCardRow) -> Self {
        ProductCard {
            id: row.id,
            model_no: row.model_no,
            image_url: row.image_url,
            lens_width: row.lens_width,
            nose_bridge: row.nose_bridge,
            temple_length: row.temple_length,
            frame_material: row.frame_material,
        }
    }
}

/// Live products joined to their live series and its material; `$1`
/// category, `$2` material, `$3` whether new designs count.
const VISIBLE_PRODUCTS: &str = r#"
    FROM products p
    LEFT JOIN series s ON s.id = p.series_id AND s.deleted_at IS NULL
    LEFT JOIN frame_materials sfm ON sfm.id = s.frame_material_id
    WHERE p.deleted_at IS NULL
      AND ($1::BIGINT IS NULL OR p.category_id = $1)
      AND ($2::BIGINT IS NULL OR p.frame_material_id = $2)
      AND ($3 OR NOT COALESCE(s.is_new_design, FALSE))
"#;

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn category_facets(&self, filter: CatalogFilter, include_new_design: bool) -> Result<Vec<Facet>, DomainError> {
        let sql = format!(
            r#"
            SELECT c.id, c.name,
                   COUNT(DISTINCT v.id) AS product_count,
                   COUNT(DISTINCT v.series_id) AS series_count
            FROM categories c
            INNER JOIN (SELECT p.id, p.category_id, p.series_id {VISIBLE_PRODUCTS}) v
                ON v.category_id = c.id
            WHERE c.deleted_at IS NULL
            GROUP BY c.id, c.name, c.display_order
            ORDER BY c.display_order, c.id
            "#
        );
        let rows: Vec<FacetRow> = sqlx::query_as(&sql)
            .bind(None::<i64>)
            .bind(filter.material_id)
            .bind(include_new_design)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("counting category facets"))?;

        Ok(rows.into_iter().map(Facet::from).collect())
    }

    async fn material_facets(&self, filter: CatalogFilter, include_new_design: bool) -> Result<Vec<Facet>, DomainError> {
        let sql = format!(
            r#"
            SELECT fm.id, fm.name,
                   COUNT(DISTINCT v.id) AS product_count,
                   COUNT(DISTINCT v.series_id) AS series_count
            FROM frame_materials fm
            INNER JOIN (SELECT p.id, p.frame_material_id, p.series_id {VISIBLE_PRODUCTS}) v
                ON v.frame_material_id = fm.id
            WHERE fm.deleted_at IS NULL
            GROUP BY fm.id, fm.name
            ORDER BY fm.id
            "#
        );
        let rows: Vec<FacetRow> = sqlx::query_as(&sql)
            .bind(filter.category_id)
            .bind(None::<i64>)
            .bind(include_new_design)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("counting material facets"))?;

        Ok(rows.into_iter().map(Facet::from).collect())
    }

    async fn series_cards(
        &self,
        filter: CatalogFilter,
        include_new_design: bool,
        pagination: Pagination,
    ) -> Result<(Vec<SeriesCard>, u64), DomainError> {
        let count_sql = format!("SELECT COUNT(DISTINCT s.id) {VISIBLE_PRODUCTS} AND s.id IS NOT NULL");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.category_id)
            .bind(filter.material_id)
            .bind(include_new_design)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting series cards"))?;

        let sql = format!(
            r#"
            SELECT s.id AS series_id, s.name AS series_name, s.is_new_design, s.pdf_url,
                   COALESCE(sfm.name, '') AS material_name,
                   COUNT(p.id) AS models_count,
                   COALESCE(SUM(p.sku_count), 0)::BIGINT AS skus_count
            {VISIBLE_PRODUCTS}
              AND s.id IS NOT NULL
            GROUP BY s.id, sfm.name
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT $4 OFFSET $5
            "#
        );
        let rows: Vec<SeriesCardRow> = sqlx::query_as(&sql)
            .bind(filter.category_id)
            .bind(filter.material_id)
            .bind(include_new_design)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing series cards"))?;

        Ok((rows.into_iter().map(SeriesCard::from).collect(), total.max(0) as u64))
    }

    async fn series_products(&self, series_id: i64) -> Result<Vec<ProductCard>, DomainError> {
        let rows: Vec<ProductCardRow> = sqlx::query_as(
            r#"
            SELECT p.id, p.model_no,
                   (SELECT pi.file_name::TEXT FROM product_images pi
                    WHERE pi.product_id = p.id
                    ORDER BY pi.position, pi.id
                    LIMIT 1) AS image_url,
                   p.lens_width, p.nose_bridge, p.temple_length,
                   COALESCE(fm.name, '') AS frame_material
            FROM products p
            LEFT JOIN frame_materials fm ON fm.id = p.frame_material_id
            WHERE p.series_id = $1 AND p.deleted_at IS NULL
            ORDER BY p.model_no, p.id
            "#,
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing series products"))?;

        Ok(rows.into_iter().map(ProductCard::from).collect())
    }
}
