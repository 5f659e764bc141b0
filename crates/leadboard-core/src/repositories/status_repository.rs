//! Status repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::commands::StatusOrder;
use crate::domain::{ListFilter, Status};
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Finds a status regardless of its active flag.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Status>, DomainError>;
    /// Active statuses narrowed by `company_uuid` and `board`, by order then newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Status>, DomainError>;
    /// Highest `order` among the active statuses of a board.
    async fn max_order(&self, board: &Uuid) -> Result<Option<i32>, DomainError>;
    async fn create(&self, status: &Status) -> Result<Status, DomainError>;
    async fn update(&self, status: &Status) -> Result<Status, DomainError>;
    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError>;
    /// Applies every entry or none of them.
    async fn reorder(&self, orders: &[StatusOrder]) -> Result<(), DomainError>;
}
