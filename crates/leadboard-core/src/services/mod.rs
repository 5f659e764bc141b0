//! Domain services (business logic)

pub mod ordering;
mod scope;
pub mod board_service;
pub mod status_service;
pub mod lead_type_service;
pub mod lead_service;
pub mod history_service;
pub mod clear_service;
pub mod auth_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth_service::AuthService;
pub use board_service::BoardService;
pub use clear_service::{ClearOutcome, ClearService};
pub use history_service::HistoryService;
pub use lead_service::LeadService;
pub use lead_type_service::LeadTypeService;
pub use status_service::StatusService;

use crate::repositories::Repositories;
use leadboard_security::JwtService;
use std::sync::Arc;

/// All services wired over one set of repositories.
#[derive(Clone)]
pub struct Services {
    pub boards: Arc<BoardService>,
    pub statuses: Arc<StatusService>,
    pub lead_types: Arc<LeadTypeService>,
    pub leads: Arc<LeadService>,
    pub histories: Arc<HistoryService>,
    pub clear: Arc<ClearService>,
    pub auth: Arc<AuthService>,
}

impl Services {
    pub fn new(repos: &Repositories, jwt: Arc<JwtService>) -> Self {
        Self {
            boards: Arc::new(BoardService::new(repos)),
            statuses: Arc::new(StatusService::new(repos)),
            lead_types: Arc::new(LeadTypeService::new(repos)),
            leads: Arc::new(LeadService::new(repos)),
            histories: Arc::new(HistoryService::new(repos)),
            clear: Arc::new(ClearService::new(repos)),
            auth: Arc::new(AuthService::new(repos.users.clone(), jwt)),
        }
    }
}
