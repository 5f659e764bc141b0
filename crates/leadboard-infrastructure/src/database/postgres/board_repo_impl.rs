// ============================================================================
// Leadboard Infrastructure - PostgreSQL Board Repository
// File: crates/leadboard-infrastructure/src/database/postgres/board_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leadboard_core::domain::{Board, ListFilter};
use leadboard_core::error::{DomainError, EntityKind};
use leadboard_core::repositories::BoardRepository;

use super::db_error;

pub struct PgBoardRepository {
    pool: PgPool,
}

impl PgBoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BoardRow {
    uuid: Uuid,
    company_uuid: Option<String>,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BoardRow> for Board {
    fn from(row: BoardRow) -> Self {
        Board {
            uuid: row.uuid,
            company_uuid: row.company_uuid,
            name: row.name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BoardRepository for PgBoardRepository {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Board>, DomainError> {
        let row: Option<BoardRow> = sqlx::query_as(
            r#"
            SELECT uuid, company_uuid, name, is_active, created_at, updated_at
            FROM boards
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding board"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Board>, DomainError> {
        let rows: Vec<BoardRow> = sqlx::query_as(
            r#"
            SELECT uuid, company_uuid, name, is_active, created_at, updated_at
            FROM boards
            WHERE is_active
              AND ($1::text IS NULL OR company_uuid = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.company_uuid.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing boards"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, board: &Board) -> Result<Board, DomainError> {
        let row: BoardRow = sqlx::query_as(
            r#"
            INSERT INTO boards (uuid, company_uuid, name, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING uuid, company_uuid, name, is_active, created_at, updated_at
            "#,
        )
        .bind(board.uuid)
        .bind(&board.company_uuid)
        .bind(&board.name)
        .bind(board.is_active)
        .bind(board.created_at)
        .bind(board.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating board"))?;
        Ok(row.into())
    }

    async fn update(&self, board: &Board) -> Result<Board, DomainError> {
        let row: Option<BoardRow> = sqlx::query_as(
            r#"
            UPDATE boards
            SET company_uuid = $2, name = $3, updated_at = $4
            WHERE uuid = $1
            RETURNING uuid, company_uuid, name, is_active, created_at, updated_at
            "#,
        )
        .bind(board.uuid)
        .bind(&board.company_uuid)
        .bind(&board.name)
        .bind(board.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating board"))?;

        row.map(Into::into)
            .ok_or_else(|| DomainError::not_found(EntityKind::Board, board.uuid))
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE boards SET is_active = FALSE, updated_at = NOW() WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(db_error("deactivating board"))?;
        Ok(())
    }
}
