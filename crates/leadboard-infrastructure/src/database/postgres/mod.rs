//! PostgreSQL repository implementations

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::error;

use leadboard_core::error::DomainError;
use leadboard_core::repositories::{Repositories, StoreHealth};

pub mod board_repo_impl;
pub mod status_repo_impl;
pub mod lead_type_repo_impl;
pub mod lead_repo_impl;
pub mod lead_history_repo_impl;
pub mod user_repo_impl;
pub mod clear_repo_impl;

pub use board_repo_impl::PgBoardRepository;
pub use status_repo_impl::PgStatusRepository;
pub use lead_type_repo_impl::PgLeadTypeRepository;
pub use lead_repo_impl::PgLeadRepository;
pub use lead_history_repo_impl::PgLeadHistoryRepository;
pub use user_repo_impl::PgUserRepository;
pub use clear_repo_impl::PgClearRepository;

/// Logs a failed statement and converts it into a domain error.
pub(crate) fn db_error(action: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e: sqlx::Error| {
        error!("Database error {}: {}", action, e);
        DomainError::DatabaseError(e.to_string())
    }
}

pub struct PgStoreHealth {
    pool: PgPool,
}

#[async_trait]
impl StoreHealth for PgStoreHealth {
    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(db_error("pinging database"))?;
        Ok(())
    }
}

/// Wires every port to a PostgreSQL adapter sharing one pool.
pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        boards: Arc::new(PgBoardRepository::new(pool.clone())),
        statuses: Arc::new(PgStatusRepository::new(pool.clone())),
        lead_types: Arc::new(PgLeadTypeRepository::new(pool.clone())),
        leads: Arc::new(PgLeadRepository::new(pool.clone())),
        histories: Arc::new(PgLeadHistoryRepository::new(pool.clone())),
        users: Arc::new(PgUserRepository::new(pool.clone())),
        clear: Arc::new(PgClearRepository::new(pool.clone())),
        health: Arc::new(PgStoreHealth { pool }),
    }
}
