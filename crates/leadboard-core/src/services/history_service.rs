//! Lead history listing

use std::sync::Arc;

use leadboard_shared::{Page, PageRequest};

use crate::domain::{LeadHistory, ListFilter};
use crate::error::DomainError;
use crate::repositories::{LeadHistoryRepository, Repositories};

pub struct HistoryService {
    histories: Arc<dyn LeadHistoryRepository>,
}

impl HistoryService {
    pub fn new(repos: &Repositories) -> Self {
        Self { histories: repos.histories.clone() }
    }

    pub async fn list(
        &self,
        filter: &ListFilter,
        request: PageRequest,
        caller_company: Option<&str>,
    ) -> Result<Page<LeadHistory>, DomainError> {
        match filter.clone().within_company(caller_company) {
            Some(filter) => self.histories.page(&filter, request).await,
            None => Ok(Page::new(Vec::new(), 0, request)),
        }
    }
}
