//! Lead history repository trait (port)

use async_trait::async_trait;
use leadboard_shared::{Page, PageRequest};
#[cfg(test)]
use mockall::automock;

use crate::domain::{LeadHistory, ListFilter};
use crate::error::DomainError;

/// Read side only: rows are appended through `LeadRepository::update`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LeadHistoryRepository: Send + Sync {
    /// Active rows narrowed by `company_uuid` and `lead`, newest first.
    async fn page(&self, filter: &ListFilter, request: PageRequest) -> Result<Page<LeadHistory>, DomainError>;
}
