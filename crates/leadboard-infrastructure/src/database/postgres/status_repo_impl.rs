// ============================================================================
// Leadboard Infrastructure - PostgreSQL Status Repository
// File: crates/leadboard-infrastructure/src/database/postgres/status_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leadboard_core::commands::StatusOrder;
use leadboard_core::domain::{ListFilter, Status};
use leadboard_core::error::{DomainError, EntityKind};
use leadboard_core::repositories::StatusRepository;

use super::db_error;

const SELECT_STATUS: &str = r#"
    SELECT s.uuid, b.uuid AS board, b.name AS board_name, s.name, s."order",
           s.is_active, s.created_at, s.updated_at
    FROM statuses s
    JOIN boards b ON b.id = s.board_id
"#;

pub struct PgStatusRepository {
    pool: PgPool,
}

impl PgStatusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, uuid: &Uuid) -> Result<Status, DomainError> {
        self.find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Status, uuid))
    }
}

#[derive(Debug, FromRow)]
struct StatusRow {
    uuid: Uuid,
    board: Uuid,
    board_name: String,
    name: String,
    order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StatusRow> for Status {
    fn from(row: StatusRow) -> Self {
        Status {
            uuid: row.uuid,
            board: row.board,
            board_name: row.board_name,
            name: row.name,
            order: row.order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl StatusRepository for PgStatusRepository {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Status>, DomainError> {
        let row: Option<StatusRow> = sqlx::query_as(&format!("{SELECT_STATUS} WHERE s.uuid = $1"))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding status"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Status>, DomainError> {
        let sql = format!(
            r#"{SELECT_STATUS}
            WHERE s.is_active
              AND ($1::text IS NULL OR b.company_uuid = $1)
              AND ($2::uuid IS NULL OR b.uuid = $2)
            ORDER BY s."order" ASC, s.created_at DESC
            "#
        );
        let rows: Vec<StatusRow> = sqlx::query_as(&sql)
            .bind(filter.company_uuid.as_deref())
            .bind(filter.board)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing statuses"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn max_order(&self, board: &Uuid) -> Result<Option<i32>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT MAX(s."order")
            FROM statuses s
            JOIN boards b ON b.id = s.board_id
            WHERE b.uuid = $1 AND s.is_active
            "#,
        )
        .bind(board)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("reading max status order"))
    }

    async fn create(&self, status: &Status) -> Result<Status, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO statuses (uuid, board_id, name, "order", is_active, created_at, updated_at)
            SELECT $1, b.id, $3, $4, $5, $6, $7
            FROM boards b
            WHERE b.uuid = $2
            "#,
        )
        .bind(status.uuid)
        .bind(status.board)
        .bind(&status.name)
        .bind(status.order)
        .bind(status.is_active)
        .bind(status.created_at)
        .bind(status.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("creating status"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Board, status.board));
        }
        self.fetch(&status.uuid).await
    }

    async fn update(&self, status: &Status) -> Result<Status, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE statuses s
            SET board_id = b.id, name = $3, "order" = $4, updated_at = $5
            FROM boards b
            WHERE s.uuid = $1 AND b.uuid = $2
            "#,
        )
        .bind(status.uuid)
        .bind(status.board)
        .bind(&status.name)
        .bind(status.order)
        .bind(status.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating status"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Status, status.uuid));
        }

        self.fetch(&status.uuid).await
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE statuses SET is_active = FALSE, updated_at = NOW() WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(db_error("deactivating status"))?;
        Ok(())
    }

    async fn reorder(&self, orders: &[StatusOrder]) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting reorder"))?;

        for entry in orders {
            let result = sqlx::query(
                r#"UPDATE statuses SET "order" = $2, updated_at = NOW() WHERE uuid = $1 AND is_active"#,
            )
            .bind(entry.uuid)
            .bind(entry.order)
            .execute(&mut *tx)
            .await
            .map_err(db_error("reordering statuses"))?;

            // Dropping the transaction rolls back whatever was applied so far.
            if result.rows_affected() == 0 {
                return Err(DomainError::not_found(EntityKind::Status, entry.uuid));
            }
        }

        tx.commit().await.map_err(db_error("committing reorder"))?;
        Ok(())
    }
}
