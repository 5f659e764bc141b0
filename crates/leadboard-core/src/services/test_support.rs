//! Mock repository wiring shared by the service tests

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;
use crate::repositories::{
    MockBoardRepository, MockClearRepository, MockLeadHistoryRepository, MockLeadRepository,
    MockLeadTypeRepository, MockStatusRepository, MockUserRepository, Repositories, StoreHealth,
};

struct AlwaysUp;

#[async_trait]
impl StoreHealth for AlwaysUp {
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

/// Mocks with no expectations; set the ones a test needs, then `build`.
pub struct MockRepos {
    pub boards: MockBoardRepository,
    pub statuses: MockStatusRepository,
    pub lead_types: MockLeadTypeRepository,
    pub leads: MockLeadRepository,
    pub histories: MockLeadHistoryRepository,
    pub users: MockUserRepository,
    pub clear: MockClearRepository,
}

impl MockRepos {
    pub fn new() -> Self {
        Self {
            boards: MockBoardRepository::new(),
            statuses: MockStatusRepository::new(),
            lead_types: MockLeadTypeRepository::new(),
            leads: MockLeadRepository::new(),
            histories: MockLeadHistoryRepository::new(),
            users: MockUserRepository::new(),
            clear: MockClearRepository::new(),
        }
    }

    pub fn build(self) -> Repositories {
        Repositories {
            boards: Arc::new(self.boards),
            statuses: Arc::new(self.statuses),
            lead_types: Arc::new(self.lead_types),
            leads: Arc::new(self.leads),
            histories: Arc::new(self.histories),
            users: Arc::new(self.users),
            clear: Arc::new(self.clear),
            health: Arc::new(AlwaysUp),
        }
    }
}
