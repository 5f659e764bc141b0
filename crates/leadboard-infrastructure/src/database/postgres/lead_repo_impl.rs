// ============================================================================
// Leadboard Infrastructure - PostgreSQL Lead Repository
// File: crates/leadboard-infrastructure/src/database/postgres/lead_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow, PgPool};
use tracing::warn;
use uuid::Uuid;

use leadboard_core::domain::{Gender, Lead, LeadHistory, ListFilter};
use leadboard_core::error::{DomainError, EntityKind};
use leadboard_core::repositories::LeadRepository;
use leadboard_shared::{Page, PageRequest};

use super::db_error;

const SELECT_LEAD: &str = r#"
    SELECT l.uuid, lt.uuid AS lead_type, lt.name AS type_name, l.title, l.phone_number,
           l.gender, l.birth_date, l.description, l.extra, l."order",
           l.is_active, l.created_at, l.updated_at
    FROM leads l
    JOIN lead_types lt ON lt.id = l.lead_type_id
    JOIN statuses s ON s.id = lt.status_id
    JOIN boards b ON b.id = s.board_id
"#;

const LEAD_FILTER: &str = r#"
    WHERE l.is_active
      AND ($1::text IS NULL OR b.company_uuid = $1)
      AND ($2::uuid IS NULL OR b.uuid = $2)
      AND ($3::uuid IS NULL OR s.uuid = $3)
      AND ($4::uuid IS NULL OR lt.uuid = $4)
"#;

pub struct PgLeadRepository {
    pool: PgPool,
}

impl PgLeadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, uuid: &Uuid) -> Result<Lead, DomainError> {
        self.find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Lead, uuid))
    }
}

#[derive(Debug, FromRow)]
struct LeadRow {
    uuid: Uuid,
    lead_type: Uuid,
    type_name: String,
    title: String,
    phone_number: Option<String>,
    gender: Option<String>,
    birth_date: Option<NaiveDate>,
    description: String,
    extra: Json<Map<String, Value>>,
    order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LeadRow> for Lead {
    fn from(row: LeadRow) -> Self {
        let gender = row.gender.as_deref().and_then(|g| {
            g.parse::<Gender>()
                .map_err(|e| warn!("Lead {}: {}", row.uuid, e))
                .ok()
        });

        Lead {
            uuid: row.uuid,
            lead_type: row.lead_type,
            type_name: row.type_name,
            title: row.title,
            phone_number: row.phone_number,
            gender,
            birth_date: row.birth_date,
            description: row.description,
            extra: row.extra.0,
            order: row.order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Lead>, DomainError> {
        let row: Option<LeadRow> = sqlx::query_as(&format!("{SELECT_LEAD} WHERE l.uuid = $1"))
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("finding lead"))?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Lead>, DomainError> {
        let sql = format!(r#"{SELECT_LEAD} {LEAD_FILTER} ORDER BY l."order" ASC, l.created_at DESC"#);
        let rows: Vec<LeadRow> = sqlx::query_as(&sql)
            .bind(filter.company_uuid.as_deref())
            .bind(filter.board)
            .bind(filter.status)
            .bind(filter.lead_type)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing leads"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn page(&self, filter: &ListFilter, request: PageRequest) -> Result<Page<Lead>, DomainError> {
        let count_sql = format!(
            r#"
            SELECT COUNT(*)
            FROM leads l
            JOIN lead_types lt ON lt.id = l.lead_type_id
            JOIN statuses s ON s.id = lt.status_id
            JOIN boards b ON b.id = s.board_id
            {LEAD_FILTER}
            "#
        );
        let count: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.company_uuid.as_deref())
            .bind(filter.board)
            .bind(filter.status)
            .bind(filter.lead_type)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting leads"))?;

        let sql = format!(
            r#"{SELECT_LEAD} {LEAD_FILTER}
            ORDER BY l."order" ASC, l.created_at DESC
            LIMIT $5 OFFSET $6
            "#
        );
        let rows: Vec<LeadRow> = sqlx::query_as(&sql)
            .bind(filter.company_uuid.as_deref())
            .bind(filter.board)
            .bind(filter.status)
            .bind(filter.lead_type)
            .bind(request.limit() as i64)
            .bind(request.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("paging leads"))?;

        let results = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(results, count.max(0) as u64, request))
    }

    async fn create(&self, lead: &Lead) -> Result<Lead, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO leads (
                uuid, lead_type_id, title, phone_number, gender, birth_date,
                description, extra, "order", is_active, created_at, updated_at
            )
            SELECT $1, lt.id, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12
            FROM lead_types lt
            WHERE lt.uuid = $2
            "#,
        )
        .bind(lead.uuid)
        .bind(lead.lead_type)
        .bind(&lead.title)
        .bind(&lead.phone_number)
        .bind(lead.gender.map(|g| g.as_str()))
        .bind(lead.birth_date)
        .bind(&lead.description)
        .bind(Json(&lead.extra))
        .bind(lead.order)
        .bind(lead.is_active)
        .bind(lead.created_at)
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("creating lead"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::LeadType, lead.lead_type));
        }
        self.fetch(&lead.uuid).await
    }

    async fn update(&self, lead: &Lead, history: Option<LeadHistory>) -> Result<Lead, DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("starting lead update"))?;

        let result = sqlx::query(
            r#"
            UPDATE leads l
            SET lead_type_id = lt.id, title = $3, phone_number = $4, gender = $5,
                birth_date = $6, description = $7, extra = $8, "order" = $9, updated_at = $10
            FROM lead_types lt
            WHERE l.uuid = $1 AND lt.uuid = $2
            "#,
        )
        .bind(lead.uuid)
        .bind(lead.lead_type)
        .bind(&lead.title)
        .bind(&lead.phone_number)
        .bind(lead.gender.map(|g| g.as_str()))
        .bind(lead.birth_date)
        .bind(&lead.description)
        .bind(Json(&lead.extra))
        .bind(lead.order)
        .bind(lead.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(db_error("updating lead"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(EntityKind::Lead, lead.uuid));
        }

        if let Some(history) = history {
            sqlx::query(
                r#"
                INSERT INTO lead_histories (uuid, lead_id, status_id, lead_type_id, is_active, created_at, updated_at)
                SELECT $1, l.id, s.id, lt.id, $5, $6, $7
                FROM leads l, statuses s, lead_types lt
                WHERE l.uuid = $2 AND s.uuid = $3 AND lt.uuid = $4
                "#,
            )
            .bind(history.uuid)
            .bind(history.lead)
            .bind(history.status)
            .bind(history.lead_type)
            .bind(history.is_active)
            .bind(history.created_at)
            .bind(history.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error("recording lead history"))?;
        }

        tx.commit().await.map_err(db_error("committing lead update"))?;
        self.fetch(&lead.uuid).await
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        sqlx::query("UPDATE leads SET is_active = FALSE, updated_at = NOW() WHERE uuid = $1")
            .bind(uuid)
            .execute(&self.pool)
            .await
            .map_err(db_error("deactivating lead"))?;
        Ok(())
    }
}
