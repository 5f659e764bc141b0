//! PostgreSQL lead history repository (read side)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use leadboard_core::domain::{LeadHistory, ListFilter};
use leadboard_core::error::DomainError;
use leadboard_core::repositories::LeadHistoryRepository;
use leadboard_shared::{Page, PageRequest};

use super::db_error;

const HISTORY_FROM: &str = r#"
    FROM lead_histories h
    JOIN leads l ON l.id = h.lead_id
    JOIN statuses s ON s.id = h.status_id
    JOIN lead_types lt ON lt.id = h.lead_type_id
    JOIN boards b ON b.id = s.board_id
    WHERE h.is_active
      AND ($1::text IS NULL OR b.company_uuid = $1)
      AND ($2::uuid IS NULL OR l.uuid = $2)
"#;

pub struct PgLeadHistoryRepository {
    pool: PgPool,
}

impl PgLeadHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeadHistoryRow {
    uuid: Uuid,
    lead: Uuid,
    lead_title: String,
    status: Uuid,
    status_name: String,
    lead_type: Uuid,
    lead_type_name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LeadHistoryRow> for LeadHistory {
    fn from(row: LeadHistoryRow) -> Self {
        LeadHistory {
            uuid: row.uuid,
            lead: row.lead,
            lead_title: row.lead_title,
            status: row.status,
            status_name: row.status_name,
            lead_type: row.lead_type,
            lead_type_name: row.lead_type_name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LeadHistoryRepository for PgLeadHistoryRepository {
    async fn page(&self, filter: &ListFilter, request: PageRequest) -> Result<Page<LeadHistory>, DomainError> {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {HISTORY_FROM}"))
            .bind(filter.company_uuid.as_deref())
            .bind(filter.lead)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting lead histories"))?;

        let sql = format!(
            r#"
            SELECT h.uuid, l.uuid AS lead, l.title AS lead_title,
                   s.uuid AS status, s.name AS status_name,
                   lt.uuid AS lead_type, lt.name AS lead_type_name,
                   h.is_active, h.created_at, h.updated_at
            {HISTORY_FROM}
            ORDER BY h.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        );
        let rows: Vec<LeadHistoryRow> = sqlx::query_as(&sql)
            .bind(filter.company_uuid.as_deref())
            .bind(filter.lead)
            .bind(request.limit() as i64)
            .bind(request.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("paging lead histories"))?;

        let results = rows.into_iter().map(Into::into).collect();
        Ok(Page::new(results, count.max(0) as u64, request))
    }
}
