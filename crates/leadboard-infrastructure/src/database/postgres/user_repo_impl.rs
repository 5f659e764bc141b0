// ============================================================================
// Leadboard Infrastructure - PostgreSQL User Repository
// File: crates/leadboard-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use leadboard_core::domain::User;
use leadboard_core::error::DomainError;
use leadboard_core::repositories::UserRepository;

use super::db_error;

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UserRow {
    pub uuid: Uuid,
    pub username: String,
    pub password_hash: String,
    pub company_uuid: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            uuid: row.uuid,
            username: row.username,
            password_hash: row.password_hash,
            company_uuid: row.company_uuid,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT uuid, username, password_hash, company_uuid, is_active, created_at, updated_at
            FROM users
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by uuid"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT uuid, username, password_hash, company_uuid, is_active, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by username"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (uuid, username, password_hash, company_uuid, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING uuid, username, password_hash, company_uuid, is_active, created_at, updated_at
            "#,
        )
        .bind(user.uuid)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.company_uuid)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            let msg = e.to_string();
            if msg.contains("duplicate") || msg.contains("unique") {
                DomainError::UsernameAlreadyExists(user.username.clone())
            } else {
                error!("Database error creating user: {}", e);
                DomainError::DatabaseError(msg)
            }
        })?;
        Ok(row.into())
    }
}
