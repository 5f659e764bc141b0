// ============================================================================
// Leadboard Infrastructure - PostgreSQL Clear Repository
// File: crates/leadboard-infrastructure/src/database/postgres/clear_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::PgPool;

use leadboard_core::commands::ClearRequest;
use leadboard_core::error::DomainError;
use leadboard_core::repositories::ClearRepository;

use super::db_error;

pub struct PgClearRepository {
    pool: PgPool,
}

impl PgClearRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClearRepository for PgClearRepository {
    async fn deactivate_all(&self, targets: &ClearRequest) -> Result<(), DomainError> {
        let named = [
            ("boards", targets.board_uuid),
            ("statuses", targets.status_uuid),
            ("lead_types", targets.leadtype_uuid),
            ("leads", targets.lead_uuid),
        ];

        // Dropping the transaction on an early return rolls every update back
        let mut tx = self.pool.begin().await.map_err(db_error("starting clear"))?;
        for (table, uuid) in named.into_iter().filter_map(|(t, u)| u.map(|u| (t, u))) {
            sqlx::query(&format!(
                "UPDATE {table} SET is_active = FALSE, updated_at = NOW() WHERE uuid = $1"
            ))
            .bind(uuid)
            .execute(&mut *tx)
            .await
            .map_err(db_error("clearing entities"))?;
        }
        tx.commit().await.map_err(db_error("committing clear"))?;
        Ok(())
    }
}
