//! Company scoping for operations that name one entity
//!
//! An entity belongs to the company of the board at the top of its chain
//! (Lead -> LeadType -> Status -> Board). Callers without a company see
//! every board.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Board;
use crate::error::DomainError;
use crate::repositories::{BoardRepository, LeadTypeRepository, Repositories, StatusRepository};

pub(crate) fn board_in_scope(board: &Board, caller_company: Option<&str>) -> bool {
    match caller_company {
        None => true,
        Some(own) => board.company_uuid.as_deref() == Some(own),
    }
}

/// Resolves the owning board of an entity through its parents.
pub(crate) struct CompanyScope {
    boards: Arc<dyn BoardRepository>,
    statuses: Arc<dyn StatusRepository>,
    lead_types: Arc<dyn LeadTypeRepository>,
}

impl CompanyScope {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            boards: repos.boards.clone(),
            statuses: repos.statuses.clone(),
            lead_types: repos.lead_types.clone(),
        }
    }

    /// Whether entities under this board are visible to the caller.
    pub async fn board(&self, board: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        if caller_company.is_none() {
            return Ok(true);
        }
        Ok(self
            .boards
            .find_by_uuid(board)
            .await?
            .is_some_and(|b| board_in_scope(&b, caller_company)))
    }

    /// Whether entities under this status are visible to the caller.
    pub async fn status(&self, status: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        if caller_company.is_none() {
            return Ok(true);
        }
        match self.statuses.find_by_uuid(status).await? {
            Some(status) => self.board(&status.board, caller_company).await,
            None => Ok(false),
        }
    }

    /// Whether entities under this lead type are visible to the caller.
    pub async fn lead_type(&self, lead_type: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        if caller_company.is_none() {
            return Ok(true);
        }
        match self.lead_types.find_by_uuid(lead_type).await? {
            Some(lead_type) => self.status(&lead_type.status, caller_company).await,
            None => Ok(false),
        }
    }
}
