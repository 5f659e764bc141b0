//! Lead type repository trait (port)

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{LeadType, ListFilter};
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeadTypeRepository: Send + Sync {
    /// Finds a lead type regardless of its active flag.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<LeadType>, DomainError>;
    /// Active lead types narrowed by `company_uuid`, `board` and `status`.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<LeadType>, DomainError>;
    /// Highest `order` among the active lead types of a status.
    async fn max_order(&self, status: &Uuid) -> Result<Option<i32>, DomainError>;
    async fn create(&self, lead_type: &LeadType) -> Result<LeadType, DomainError>;
    async fn update(&self, lead_type: &LeadType) -> Result<LeadType, DomainError>;
    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError>;
}
