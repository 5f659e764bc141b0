//! Board repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{Board, ListFilter};
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Finds a board regardless of its active flag.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Board>, DomainError>;
    /// Active boards narrowed by `company_uuid`, newest first.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Board>, DomainError>;
    async fn create(&self, board: &Board) -> Result<Board, DomainError>;
    async fn update(&self, board: &Board) -> Result<Board, DomainError>;
    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError>;
}
