// ============================================================================
// Leadboard Infrastructure - PostgreSQL Lead Type Repository
// File: crates/leadboard-infrastructure/src/database/postgres/lead_type_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leadboard_core::domain::{LeadType, ListFilter};
use leadboard_core::error::{DomainError, EntityKind};
use leadboard_core::repositories::LeadTypeRepository;

use super::db_error;

const SELECT_LEAD_TYPE: &str = r#"
    SELECT lt.uuid, s.uuid AS status, s.name AS status_name, lt.name, lt.description,
           lt."order", lt.is_active, lt.created_at, lt.updated_at
    FROM lead_types lt
    JOIN statuses s ON s.id = lt.status_id
    JOIN boards b ON b.id = s.board_id
"#;

pub struct PgLeadTypeRepository {
    pool: PgPool,
}

impl PgLeadTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, uuid: &Uuid) -> Result<LeadType, DomainError> {
        self.find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::LeadType, uuid))
    }
}

#[derive(Debug, FromRow)]
struct LeadTypeRow {
    uuid: Uuid,
    status: Uuid,
    status_name: String,
    name: String,
    description: String,
    order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LeadTypeRow> for LeadType {
    fn from(row: LeadTypeRow) -> Self {
        LeadType {
            uuid: row.uuid,
            status: row.status,
            status_name: row.status_name,
            name: row.name,
            description: row.description,
            order: row.order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LeadTypeRepository for PgLeadTypeRepository {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<LeadType>, DomainError> {
        let row: Option<LeadTypeRow> = sqlx::query_as(&format!("{SELECT_LEAD_TYPE} WHERE lt.uuid = $1"))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding lead type"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<LeadType>, DomainError> {
        let sql = format!(
            r#"{SELECT_LEAD_TYPE}
            WHERE lt.is_active
              AND ($1::text IS NULL OR b.company_uuid = $1)
              AND ($2::uuid IS NULL OR b.uuid = $2)
              AND ($3::uuid IS NULL OR s.uuid = $3)
            ORDER BY lt."order" ASC, lt.created_at DESC
            "#
        );
        let rows: Vec<LeadTypeRow> = sqlx::query_as(&sql)
            .bind(filter.company_uuid.as_deref())
            .bind(filter.board)
            .bind(filter.status)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing lead types"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn max_order(&self, status: &Uuid) -> Result<Option<i32>, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT MAX(lt."order")
            FROM lead_types lt
            JOIN statuses s ON s.id = lt.status_id
            WHERE s.uuid = $1 AND lt.is_active
            "#,
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("reading max lead type order"))
    }

    async fn create(&self, lead_type: &LeadType) -> Result<LeadType, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO lead_types (uuid, status_id, name, description, "order", is_active, created_at, updated_at)
            SELECT $1, s.id, $3, $4, $5, $6, $7, $8
            FROM statuses s
            WHERE s.uuid = $2
            "#,
        )
        .bind(lead_type.uuid)
        .bind(lead_type.status)
        .bind(&lead_type.name)
        .bind(&lead_type.description)
        .bind(lead_type.order)
        .bind(lead_type.is_active)
        .bind(lead_type.created_at)
        .bind(lead_type.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("creating lead type"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Status, lead_type.status));
        }
        self.fetch(&lead_type.uuid).await
    }

    async fn update(&self, lead_type: &LeadType) -> Result<LeadType, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE lead_types lt
            SET status_id = s.id, name = $3, description = $4, "order" = $5, updated_at = $6
            FROM statuses s
            WHERE lt.uuid = $1 AND s.uuid = $2
            "#,
        )
        .bind(lead_type.uuid)
        .bind(lead_type.status)
        .bind(&lead_type.name)
        .bind(&lead_type.description)
        .bind(lead_type.order)
        .bind(lead_type.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating lead type"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::LeadType, lead_type.uuid));
        }

        self.fetch(&lead_type.uuid).await
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE lead_types SET is_active = FALSE, updated_at = NOW() WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(db_error("deactivating lead type"))?;
        Ok(())
    }
}
