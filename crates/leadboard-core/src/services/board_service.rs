// ============================================================================
// Leadboard Core - Board Service
// File: crates/leadboard-core/src/services/board_service.rs
// ============================================================================
//! Board CRUD and the nested board overview

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::scope::board_in_scope;
use crate::commands::{CreateBoard, UpdateBoard};
use crate::domain::{Board, BoardOverview, ListFilter};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{BoardRepository, LeadRepository, LeadTypeRepository, Repositories, StatusRepository};

pub struct BoardService {
    boards: Arc<dyn BoardRepository>,
    statuses: Arc<dyn StatusRepository>,
    lead_types: Arc<dyn LeadTypeRepository>,
    leads: Arc<dyn LeadRepository>,
}

/// A caller with a company may only place boards in that company.
fn check_company(company: Option<&str>, caller_company: Option<&str>) -> Result<(), DomainError> {
    match caller_company {
        Some(own) if company != Some(own) => Err(DomainError::ValidationError(
            "company_uuid must match the caller's company".to_string(),
        )),
        _ => Ok(()),
    }
}

impl BoardService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            boards: repos.boards.clone(),
            statuses: repos.statuses.clone(),
            lead_types: repos.lead_types.clone(),
            leads: repos.leads.clone(),
        }
    }

    pub async fn list(&self, filter: &ListFilter, caller_company: Option<&str>) -> Result<Vec<Board>, DomainError> {
        match filter.clone().within_company(caller_company) {
            Some(filter) => self.boards.list(&filter).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<Board, DomainError> {
        self.boards
            .find_by_uuid(uuid)
            .await?
            .filter(|b| b.is_active && board_in_scope(b, caller_company))
            .ok_or_else(|| DomainError::not_found(EntityKind::Board, uuid))
    }

    /// Creates a board. Without an explicit company the caller's company is used.
    pub async fn create(&self, cmd: CreateBoard, caller_company: Option<&str>) -> Result<Board, DomainError> {
        cmd.validate()?;
        let company = cmd
            .company_uuid
            .map(|c| c.trim().to_string())
            .or_else(|| caller_company.map(str::to_string));
        check_company(company.as_deref(), caller_company)?;

        let board = self.boards.create(&Board::new(cmd.name, company)).await?;
        info!("Board created: {} ({})", board.uuid, board.name);
        Ok(board)
    }

    pub async fn update(
        &self,
        uuid: &Uuid,
        patch: UpdateBoard,
        caller_company: Option<&str>,
    ) -> Result<Board, DomainError> {
        patch.validate()?;
        let mut board = self.get(uuid, caller_company).await?;
        if let Some(name) = patch.name {
            board.name = name.trim().to_string();
        }
        if let Some(company) = patch.company_uuid {
            let company = company.map(|c| c.trim().to_string());
            check_company(company.as_deref(), caller_company)?;
            board.company_uuid = company;
        }
        board.touch();
        self.boards.update(&board).await
    }

    /// Soft delete. Statuses of the board are left untouched.
    pub async fn delete(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<(), DomainError> {
        let board = self
            .boards
            .find_by_uuid(uuid)
            .await?
            .filter(|b| board_in_scope(b, caller_company))
            .ok_or_else(|| DomainError::not_found(EntityKind::Board, uuid))?;
        if board.is_active {
            self.boards.deactivate(uuid).await?;
            info!("Board deactivated: {}", uuid);
        } else {
            debug!("Board {} already inactive", uuid);
        }
        Ok(())
    }

    pub async fn overview(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<BoardOverview, DomainError> {
        let board = self.get(uuid, caller_company).await?;
        let filter = ListFilter::for_board(board.uuid);
        let statuses = self.statuses.list(&filter).await?;
        let lead_types = self.lead_types.list(&filter).await?;
        let leads = self.leads.list(&filter).await?;
        Ok(BoardOverview::assemble(board, statuses, lead_types, leads))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::MockRepos;

    #[tokio::test]
    async fn test_create_defaults_to_caller_company() {
        let mut mocks = MockRepos::new();
        mocks.boards.expect_create().times(1).returning(|b| Ok(b.clone()));
        let service = BoardService::new(&mocks.build());

        let board = service
            .create(CreateBoard { name: "Sales".into(), company_uuid: None }, Some("acme"))
            .await
            .unwrap();
        assert_eq!(board.company_uuid.as_deref(), Some("acme"));
    }

    #[tokio::test]
    async fn test_explicit_company_without_caller_company() {
        let mut mocks = MockRepos::new();
        mocks.boards.expect_create().returning(|b| Ok(b.clone()));
        let service = BoardService::new(&mocks.build());

        let board = service
            .create(CreateBoard { name: "Sales".into(), company_uuid: Some("globex".into()) }, None)
            .await
            .unwrap();
        assert_eq!(board.company_uuid.as_deref(), Some("globex"));
    }

    #[tokio::test]
    async fn test_create_for_other_company_rejected() {
        let mut mocks = MockRepos::new();
        mocks.boards.expect_create().times(0);
        let service = BoardService::new(&mocks.build());

        let result = service
            .create(
                CreateBoard { name: "Sales".into(), company_uuid: Some("globex".into()) },
                Some("acme"),
            )
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_other_company_board_is_not_found() {
        let board = Board::new("Sales".into(), Some("acme".into()));
        let uuid = board.uuid;

        let mut mocks = MockRepos::new();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(board.clone())));
        mocks.boards.expect_update().times(0);
        mocks.boards.expect_deactivate().times(0);
        let service = BoardService::new(&mocks.build());

        let patch = UpdateBoard { name: Some("Taken".into()), ..UpdateBoard::default() };
        assert!(matches!(
            service.update(&uuid, patch, Some("globex")).await,
            Err(DomainError::NotFound { entity: EntityKind::Board, .. })
        ));
        assert!(matches!(
            service.delete(&uuid, Some("globex")).await,
            Err(DomainError::NotFound { entity: EntityKind::Board, .. })
        ));
        assert!(service.get(&uuid, Some("acme")).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_clears_company_for_unscoped_caller() {
        let board = Board::new("Sales".into(), Some("acme".into()));
        let uuid = board.uuid;

        let mut mocks = MockRepos::new();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(board.clone())));
        mocks.boards.expect_update().times(1).returning(|b| Ok(b.clone()));
        let service = BoardService::new(&mocks.build());

        let patch = UpdateBoard { company_uuid: Some(None), ..UpdateBoard::default() };
        let updated = service.update(&uuid, patch.clone(), None).await.unwrap();
        assert_eq!(updated.company_uuid, None);

        assert!(matches!(
            service.update(&uuid, patch, Some("acme")).await,
            Err(DomainError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_inactive_board_is_noop() {
        let mut inactive = Board::new("Old".into(), None);
        inactive.is_active = false;
        let uuid = inactive.uuid;

        let mut mocks = MockRepos::new();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(inactive.clone())));
        mocks.boards.expect_deactivate().times(0);
        let service = BoardService::new(&mocks.build());

        assert!(service.delete(&uuid, None).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_inactive_board_is_not_found() {
        let mut inactive = Board::new("Old".into(), None);
        inactive.is_active = false;
        let uuid = inactive.uuid;

        let mut mocks = MockRepos::new();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(inactive.clone())));
        let service = BoardService::new(&mocks.build());

        assert!(matches!(
            service.get(&uuid, None).await,
            Err(DomainError::NotFound { entity: EntityKind::Board, .. })
        ));
    }
}
