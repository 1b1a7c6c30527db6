// ============================================================================
// Catalog Infrastructure - PostgreSQL Storefront Customer Repository
// File: crates/catalog-infrastructure/src/database/postgres/customer_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{error, info};

use catalog_core::domain::{Customer, CustomerChanges, CustomerDraft, CustomerStatus};
use catalog_core::error::DomainError;
use catalog_core::repositories::CustomerRepository;
use catalog_shared::Pagination;

use super::{contains_pattern, db_error, is_foreign_key_violation, is_unique_violation};

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CustomerRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    avatar: Option<String>,
    status: i16,
    role_id: Option<i64>,
    ip_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password,
            avatar: row.avatar,
            status: CustomerStatus::from_i16(row.status),
            role_id: row.role_id,
            ip_address: row.ip_address,
            created_at: row.created_at,
        }
    }
}

fn write_error<'a>(username: &'a str, email: &'a str) -> impl Fn(sqlx::Error) -> DomainError + 'a {
    move |e| {
        error!("Database error writing customer: {}", e);
        if is_unique_violation(&e) {
            if e.to_string().contains("email") {
                DomainError::EmailAlreadyExists(email.to_string())
            } else {
                DomainError::UsernameAlreadyExists(username.to_string())
            }
        } else if is_foreign_key_violation(&e) {
            DomainError::ReferenceNotFound("role".into())
        } else {
            DomainError::DatabaseError(e.to_string())
        }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, avatar, status, role_id, ip_address, created_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding customer by id"))?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, avatar, status, role_id, ip_address, created_at
            FROM users
            WHERE LOWER(email) = LOWER($1) AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding customer by email"))?;

        Ok(row.map(Customer::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, avatar, status, role_id, ip_address, created_at
            FROM users
            WHERE LOWER(username) = LOWER($1) AND deleted_at IS NULL
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding customer by username"))?;

        Ok(row.map(Customer::from))
    }

    async fn create(&self, draft: &CustomerDraft) -> Result<Customer, DomainError> {
        let row: CustomerRow = sqlx::query_as(
            r#"
            INSERT INTO users (username, email, password, status, role_id, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, email, password, avatar, status, role_id, ip_address, created_at
            "#,
        )
        .bind(&draft.username)
        .bind(&draft.email)
        .bind(&draft.password_hash)
        .bind(draft.status.as_i16())
        .bind(draft.role_id)
        .bind(&draft.ip_address)
        .fetch_one(&self.pool)
        .await
        .map_err(write_error(&draft.username, &draft.email))?;

        info!("Customer created: {}", row.id);
        Ok(row.into())
    }

    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE users SET password = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("updating customer password"))?;

        Ok(())
    }

    async fn list_page(&self, query: &str, pagination: Pagination) -> Result<(Vec<Customer>, u64), DomainError> {
        let pattern = contains_pattern(query);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM users WHERE deleted_at IS NULL AND (username ILIKE $1 OR email ILIKE $1)",
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting customers"))?;

        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, password, avatar, status, role_id, ip_address, created_at
            FROM users
            WHERE deleted_at IS NULL AND (username ILIKE $1 OR email ILIKE $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&pattern)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("paging customers"))?;

        Ok((rows.into_iter().map(Customer::from).collect(), total.max(0) as u64))
    }

    async fn update(&self, changes: &CustomerChanges) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET username = $2, email = $3, password = COALESCE($4, password), status = $5,
                role_id = $6, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, username, email, password, avatar, status, role_id, ip_address, created_at
            "#,
        )
        .bind(changes.id)
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(changes.status.as_i16())
        .bind(changes.role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(write_error(&changes.username, &changes.email))?;

        Ok(row.map(Customer::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting customer"))?;

        Ok(result.rows_affected() > 0)
    }
}
