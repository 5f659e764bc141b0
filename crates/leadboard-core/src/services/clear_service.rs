// ============================================================================
// Leadboard Core - Clear Service
// File: crates/leadboard-core/src/services/clear_service.rs
// ============================================================================
//! Caller-driven cascade soft delete

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::scope::{board_in_scope, CompanyScope};
use crate::commands::ClearRequest;
use crate::error::{DomainError, EntityKind};
use crate::repositories::{
    BoardRepository, ClearRepository, LeadRepository, LeadTypeRepository, Repositories, StatusRepository,
};

/// What a clear request changed. `false` for an entity that was named but
/// already inactive, `None` for one that was not named.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClearOutcome {
    pub board: Option<bool>,
    pub status: Option<bool>,
    pub lead_type: Option<bool>,
    pub lead: Option<bool>,
}

impl ClearOutcome {
    /// The named entities that are still active and need deactivating.
    fn targets(&self, request: &ClearRequest) -> ClearRequest {
        let pick = |uuid: Option<Uuid>, active: Option<bool>| uuid.filter(|_| active == Some(true));
        ClearRequest {
            board_uuid: pick(request.board_uuid, self.board),
            status_uuid: pick(request.status_uuid, self.status),
            leadtype_uuid: pick(request.leadtype_uuid, self.lead_type),
            lead_uuid: pick(request.lead_uuid, self.lead),
        }
    }
}

pub struct ClearService {
    boards: Arc<dyn BoardRepository>,
    statuses: Arc<dyn StatusRepository>,
    lead_types: Arc<dyn LeadTypeRepository>,
    leads: Arc<dyn LeadRepository>,
    clear: Arc<dyn ClearRepository>,
    scope: CompanyScope,
}

impl ClearService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            boards: repos.boards.clone(),
            statuses: repos.statuses.clone(),
            lead_types: repos.lead_types.clone(),
            leads: repos.leads.clone(),
            clear: repos.clear.clone(),
            scope: CompanyScope::new(repos),
        }
    }

    /// Deactivates exactly the named entities, never their children. Every name is
    /// resolved before anything is deactivated, so an unknown one changes nothing,
    /// and the deactivations are applied as one unit.
    pub async fn clear(&self, request: ClearRequest, caller_company: Option<&str>) -> Result<ClearOutcome, DomainError> {
        if request.is_empty() {
            return Err(DomainError::ValidationError(
                "Provide at least one of board_uuid, status_uuid, leadtype_uuid, lead_uuid".to_string(),
            ));
        }

        let board = match &request.board_uuid {
            Some(uuid) => Some(self.board_is_active(uuid, caller_company).await?),
            None => None,
        };
        let status = match &request.status_uuid {
            Some(uuid) => Some(self.status_is_active(uuid, caller_company).await?),
            None => None,
        };
        let lead_type = match &request.leadtype_uuid {
            Some(uuid) => Some(self.lead_type_is_active(uuid, caller_company).await?),
            None => None,
        };
        let lead = match &request.lead_uuid {
            Some(uuid) => Some(self.lead_is_active(uuid, caller_company).await?),
            None => None,
        };

        let outcome = ClearOutcome { board, status, lead_type, lead };
        let targets = outcome.targets(&request);
        if targets.is_empty() {
            debug!("Clear named only inactive entities");
        } else {
            self.clear.deactivate_all(&targets).await?;
        }

        info!("Clear applied: {:?}", outcome);
        Ok(outcome)
    }

    async fn board_is_active(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        let board = self
            .boards
            .find_by_uuid(uuid)
            .await?
            .filter(|b| board_in_scope(b, caller_company))
            .ok_or_else(|| DomainError::not_found(EntityKind::Board, uuid))?;
        Ok(noted(EntityKind::Board, uuid, board.is_active))
    }

    async fn status_is_active(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        let status = self
            .statuses
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Status, uuid))?;
        if !self.scope.board(&status.board, caller_company).await? {
            return Err(DomainError::not_found(EntityKind::Status, uuid));
        }
        Ok(noted(EntityKind::Status, uuid, status.is_active))
    }

    async fn lead_type_is_active(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        let lead_type = self
            .lead_types
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::LeadType, uuid))?;
        if !self.scope.status(&lead_type.status, caller_company).await? {
            return Err(DomainError::not_found(EntityKind::LeadType, uuid));
        }
        Ok(noted(EntityKind::LeadType, uuid, lead_type.is_active))
    }

    async fn lead_is_active(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<bool, DomainError> {
        let lead = self
            .leads
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Lead, uuid))?;
        if !self.scope.lead_type(&lead.lead_type, caller_company).await? {
            return Err(DomainError::not_found(EntityKind::Lead, uuid));
        }
        Ok(noted(EntityKind::Lead, uuid, lead.is_active))
    }
}

fn noted(entity: EntityKind, uuid: &Uuid, is_active: bool) -> bool {
    if !is_active {
        debug!("{} {} already inactive", entity, uuid);
    }
    is_active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, Lead, LeadType, Status};
    use crate::services::test_support::MockRepos;

    struct Tree {
        board: Board,
        status: Status,
        lead_type: LeadType,
        lead: Lead,
    }

    fn tree() -> Tree {
        let board = Board::new("Sales".into(), Some("acme".into()));
        let status = Status::new(&board, "New".into(), 1);
        let lead_type = LeadType::new(&status, "Inbound".into(), String::new(), 1);
        let lead = Lead::new(&lead_type, "ACME".into());
        Tree { board, status, lead_type, lead }
    }

    fn finders(t: &Tree) -> MockRepos {
        let mut mocks = MockRepos::new();
        let board = t.board.clone();
        mocks.boards.expect_find_by_uuid().returning(move |u| Ok(Some(board.clone()).filter(|b| b.uuid == *u)));
        let status = t.status.clone();
        mocks.statuses.expect_find_by_uuid().returning(move |u| Ok(Some(status.clone()).filter(|s| s.uuid == *u)));
        let lead_type = t.lead_type.clone();
        mocks
            .lead_types
            .expect_find_by_uuid()
            .returning(move |u| Ok(Some(lead_type.clone()).filter(|lt| lt.uuid == *u)));
        let lead = t.lead.clone();
        mocks.leads.expect_find_by_uuid().returning(move |u| Ok(Some(lead.clone()).filter(|l| l.uuid == *u)));
        mocks
    }

    #[tokio::test]
    async fn test_clear_lead_type_only() {
        let t = tree();
        let mut mocks = finders(&t);
        let expected = ClearRequest { leadtype_uuid: Some(t.lead_type.uuid), ..Default::default() };
        let check = expected.clone();
        mocks
            .clear
            .expect_deactivate_all()
            .withf(move |targets| *targets == check)
            .times(1)
            .returning(|_| Ok(()));
        let service = ClearService::new(&mocks.build());

        let outcome = service.clear(expected, Some("acme")).await.unwrap();
        assert_eq!(outcome, ClearOutcome { lead_type: Some(true), ..Default::default() });
    }

    #[tokio::test]
    async fn test_clear_every_level_in_one_call() {
        let t = tree();
        let mut mocks = finders(&t);
        let request = ClearRequest {
            board_uuid: Some(t.board.uuid),
            status_uuid: Some(t.status.uuid),
            leadtype_uuid: Some(t.lead_type.uuid),
            lead_uuid: Some(t.lead.uuid),
        };
        let check = request.clone();
        mocks
            .clear
            .expect_deactivate_all()
            .withf(move |targets| *targets == check)
            .times(1)
            .returning(|_| Ok(()));
        let service = ClearService::new(&mocks.build());

        service.clear(request, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_name_deactivates_nothing() {
        let t = tree();
        let mut mocks = finders(&t);
        mocks.clear.expect_deactivate_all().times(0);
        let service = ClearService::new(&mocks.build());

        let result = service
            .clear(
                ClearRequest {
                    board_uuid: Some(t.board.uuid),
                    lead_uuid: Some(Uuid::new_v4()),
                    ..Default::default()
                },
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { entity: EntityKind::Lead, .. })));
    }

    #[tokio::test]
    async fn test_other_company_entity_is_not_found() {
        let t = tree();
        let mut mocks = finders(&t);
        mocks.clear.expect_deactivate_all().times(0);
        let service = ClearService::new(&mocks.build());

        for request in [
            ClearRequest { board_uuid: Some(t.board.uuid), ..Default::default() },
            ClearRequest { lead_uuid: Some(t.lead.uuid), ..Default::default() },
        ] {
            assert!(matches!(
                service.clear(request, Some("globex")).await,
                Err(DomainError::NotFound { .. })
            ));
        }
    }

    #[tokio::test]
    async fn test_already_inactive_is_noop() {
        let mut t = tree();
        t.lead.is_active = false;
        let mut mocks = finders(&t);
        mocks.clear.expect_deactivate_all().times(0);
        let service = ClearService::new(&mocks.build());

        let outcome = service
            .clear(ClearRequest { lead_uuid: Some(t.lead.uuid), ..Default::default() }, None)
            .await
            .unwrap();
        assert_eq!(outcome.lead, Some(false));
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let t = tree();
        let mut mocks = finders(&t);
        mocks
            .clear
            .expect_deactivate_all()
            .returning(|_| Err(DomainError::DatabaseError("connection reset".into())));
        let service = ClearService::new(&mocks.build());

        let result = service
            .clear(ClearRequest { status_uuid: Some(t.status.uuid), ..Default::default() }, None)
            .await;
        assert!(matches!(result, Err(DomainError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_empty_request_rejected() {
        let service = ClearService::new(&MockRepos::new().build());
        assert!(matches!(
            service.clear(ClearRequest::default(), None).await,
            Err(DomainError::ValidationError(_))
        ));
    }
}
