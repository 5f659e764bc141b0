//! Repository traits (ports)

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DomainError;

pub mod board_repository;
pub mod status_repository;
pub mod lead_type_repository;
pub mod lead_repository;
pub mod lead_history_repository;
pub mod user_repository;
pub mod clear_repository;

pub use board_repository::BoardRepository;
pub use status_repository::StatusRepository;
pub use lead_type_repository::LeadTypeRepository;
pub use lead_repository::LeadRepository;
pub use lead_history_repository::LeadHistoryRepository;
pub use user_repository::UserRepository;
pub use clear_repository::ClearRepository;

#[cfg(test)]
pub use board_repository::MockBoardRepository;
#[cfg(test)]
pub use status_repository::MockStatusRepository;
#[cfg(test)]
pub use lead_type_repository::MockLeadTypeRepository;
#[cfg(test)]
pub use lead_repository::MockLeadRepository;
#[cfg(test)]
pub use lead_history_repository::MockLeadHistoryRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
#[cfg(test)]
pub use clear_repository::MockClearRepository;

/// Liveness of the backing store, used by the readiness probe.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DomainError>;
}

/// Every port a store adapter has to provide.
#[derive(Clone)]
pub struct Repositories {
    pub boards: Arc<dyn BoardRepository>,
    pub statuses: Arc<dyn StatusRepository>,
    pub lead_types: Arc<dyn LeadTypeRepository>,
    pub leads: Arc<dyn LeadRepository>,
    pub histories: Arc<dyn LeadHistoryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub clear: Arc<dyn ClearRepository>,
    pub health: Arc<dyn StoreHealth>,
}
