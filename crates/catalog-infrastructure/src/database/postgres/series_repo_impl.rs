// ============================================================================
// Catalog Infrastructure - PostgreSQL Series Repository
// File: crates/catalog-infrastructure/src/database/postgres/series_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{NewSeries, Series, SeriesUpdate};
use catalog_core::error::DomainError;
use catalog_core::repositories::SeriesRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_foreign_key_violation, is_unique_violation};

pub struct PgSeriesRepository {
    pool: PgPool,
}

impl PgSeriesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SeriesRow {
    id: i64,
    name: String,
    description: String,
    pdf_url: String,
    frame_material_id: i64,
    frame_material_name: String,
    is_new_design: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SeriesRow> for Series {
    fn from(row: SeriesRow) -> Self {
        Series {
            id: row.id,
            name: row.name,
            description: row.description,
            pdf_url: row.pdf_url,
            frame_material_id: row.frame_material_id,
            frame_material_name: row.frame_material_name,
            is_new_design: row.is_new_design,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Projection over a row source `s` joined to its material.
const SERIES_COLUMNS: &str = r#"
    s.id, s.name, s.description, s.pdf_url, s.frame_material_id,
    COALESCE(fm.name, '') AS frame_material_name, s.is_new_design, s.created_at, s.updated_at
"#;

fn write_error(name: &str, frame_material_id: i64) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| {
        if is_unique_violation(&e) {
            DomainError::SeriesNameAlreadyExists(name.to_string())
        } else if is_foreign_key_violation(&e) {
            DomainError::ReferenceNotFound(format!("frame material {}", frame_material_id))
        } else {
            error!("Database error writing series: {}", e);
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl SeriesRepository for PgSeriesRepository {
    async fn list_all(&self) -> Result<Vec<Series>, DomainError> {
        let sql = format!(
            r#"
            SELECT {SERIES_COLUMNS}
            FROM series s
            LEFT JOIN frame_materials fm ON fm.id = s.frame_material_id
            WHERE s.deleted_at IS NULL
            ORDER BY s.id
            "#
        );
        let rows: Vec<SeriesRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing series"))?;

        Ok(rows.into_iter().map(Series::from).collect())
    }

    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Series>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM series WHERE deleted_at IS NULL AND name ILIKE $1")
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting series"))?;

        let sql = format!(
            r#"
            SELECT {SERIES_COLUMNS}
            FROM series s
            LEFT JOIN frame_materials fm ON fm.id = s.frame_material_id
            WHERE s.deleted_at IS NULL AND s.name ILIKE $1
            ORDER BY s.created_at DESC, s.id DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows: Vec<SeriesRow> = sqlx::query_as(&sql)
            .bind(&pattern)
            .bind(pagination.limit())
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("paging series"))?;

        Ok((rows.into_iter().map(Series::from).collect(), total.max(0) as u64))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Series>, DomainError> {
        let sql = format!(
            r#"
            SELECT {SERIES_COLUMNS}
            FROM series s
            LEFT JOIN frame_materials fm ON fm.id = s.frame_material_id
            WHERE s.id = $1 AND s.deleted_at IS NULL
            "#
        );
        let row: Option<SeriesRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding series by id"))?;

        Ok(row.map(Series::from))
    }

    async fn create(&self, series: &NewSeries) -> Result<Series, DomainError> {
        let sql = format!(
            r#"
            WITH s AS (
                INSERT INTO series (name, description, pdf_url, frame_material_id, is_new_design)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT {SERIES_COLUMNS}
            FROM s
            LEFT JOIN frame_materials fm ON fm.id = s.frame_material_id
            "#
        );
        let row: SeriesRow = sqlx::query_as(&sql)
            .bind(&series.name)
            .bind(&series.description)
            .bind(&series.pdf_url)
            .bind(series.frame_material_id)
            .bind(series.is_new_design)
            .fetch_one(&self.pool)
            .await
            .map_err(write_error(&series.name, series.frame_material_id))?;

        info!("Series row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, update: &SeriesUpdate) -> Result<Option<Series>, DomainError> {
        let sql = format!(
            r#"
            WITH s AS (
                UPDATE series
                SET name = $2, description = $3, pdf_url = $4, frame_material_id = $5,
                    is_new_design = $6, updated_at = NOW()
                WHERE id = $1 AND deleted_at IS NULL
                RETURNING *
            )
            SELECT {SERIES_COLUMNS}
            FROM s
            LEFT JOIN frame_materials fm ON fm.id = s.frame_material_id
            "#
        );
        let row: Option<SeriesRow> = sqlx::query_as(&sql)
            .bind(update.id)
            .bind(&update.name)
            .bind(&update.description)
            .bind(&update.pdf_url)
            .bind(update.frame_material_id)
            .bind(update.is_new_design)
            .fetch_optional(&self.pool)
            .await
            .map_err(write_error(&update.name, update.frame_material_id))?;

        Ok(row.map(Series::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE series SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting series"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64, DomainError> {
        let result = sqlx::query("UPDATE series SET deleted_at = NOW() WHERE id = ANY($1) AND deleted_at IS NULL")
            .bind(ids)
            .execute(&self.pool)
            .await
            .map_err(db_error("batch deleting series"))?;

        Ok(result.rows_affected())
    }
}
