//! Lead repository trait (port)

use async_trait::async_trait;
use leadboard_shared::{Page, PageRequest};
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::{Lead, LeadHistory, ListFilter};
use crate::error::DomainError;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Finds a lead regardless of its active flag.
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Lead>, DomainError>;
    /// Active leads narrowed by `company_uuid`, `board`, `status` and `lead_type`.
    async fn list(&self, filter: &ListFilter) -> Result<Vec<Lead>, DomainError>;
    /// Same selection and ordering as `list`, one page of it.
    async fn page(&self, filter: &ListFilter, request: PageRequest) -> Result<Page<Lead>, DomainError>;
    async fn create(&self, lead: &Lead) -> Result<Lead, DomainError>;
    /// Persists the lead and, when given, the history row of its move in one unit.
    async fn update(&self, lead: &Lead, history: Option<LeadHistory>) -> Result<Lead, DomainError>;
    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError>;
}
