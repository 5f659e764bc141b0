// ============================================================================
// Leadboard Core - Status Service
// File: crates/leadboard-core/src/services/status_service.rs
// ============================================================================
//! Status CRUD, order assignment and bulk re-sequencing

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::ordering::resolve_order;
use super::scope::{board_in_scope, CompanyScope};
use crate::commands::{CreateStatus, StatusOrder, UpdateStatus};
use crate::domain::{Board, ListFilter, Status};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{BoardRepository, Repositories, StatusRepository};

pub struct StatusService {
    statuses: Arc<dyn StatusRepository>,
    boards: Arc<dyn BoardRepository>,
    scope: CompanyScope,
}

impl StatusService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            statuses: repos.statuses.clone(),
            boards: repos.boards.clone(),
            scope: CompanyScope::new(repos),
        }
    }

    pub async fn list(&self, filter: &ListFilter, caller_company: Option<&str>) -> Result<Vec<Status>, DomainError> {
        match filter.clone().within_company(caller_company) {
            Some(filter) => self.statuses.list(&filter).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<Status, DomainError> {
        if let Some(status) = self.statuses.find_by_uuid(uuid).await?.filter(|s| s.is_active) {
            if self.scope.board(&status.board, caller_company).await? {
                return Ok(status);
            }
        }
        Err(DomainError::not_found(EntityKind::Status, uuid))
    }

    async fn active_board(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<Board, DomainError> {
        self.boards
            .find_by_uuid(uuid)
            .await?
            .filter(|b| b.is_active && board_in_scope(b, caller_company))
            .ok_or_else(|| DomainError::not_found(EntityKind::Board, uuid))
    }

    /// Creates a status; without an explicit order it goes after its active siblings.
    pub async fn create(&self, cmd: CreateStatus, caller_company: Option<&str>) -> Result<Status, DomainError> {
        cmd.validate()?;
        let board = self.active_board(&cmd.board, caller_company).await?;
        let order = match cmd.order {
            Some(order) => order,
            None => resolve_order(None, self.statuses.max_order(&board.uuid).await),
        };

        let status = self.statuses.create(&Status::new(&board, cmd.name, order)).await?;
        info!("Status created: {} on board {} (order {})", status.uuid, board.uuid, status.order);
        Ok(status)
    }

    pub async fn update(
        &self,
        uuid: &Uuid,
        patch: UpdateStatus,
        caller_company: Option<&str>,
    ) -> Result<Status, DomainError> {
        patch.validate()?;
        let mut status = self.get(uuid, caller_company).await?;
        if let Some(board_uuid) = patch.board {
            let board = self.active_board(&board_uuid, caller_company).await?;
            status.move_to(&board);
        }
        if let Some(name) = patch.name {
            status.name = name.trim().to_string();
        }
        if let Some(order) = patch.order {
            status.order = order;
        }
        status.touch();
        self.statuses.update(&status).await
    }

    /// Soft delete. Lead types of the status are left untouched.
    pub async fn delete(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<(), DomainError> {
        let status = self
            .statuses
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Status, uuid))?;
        if !self.scope.board(&status.board, caller_company).await? {
            return Err(DomainError::not_found(EntityKind::Status, uuid));
        }
        if status.is_active {
            self.statuses.deactivate(uuid).await?;
            info!("Status deactivated: {}", uuid);
        } else {
            debug!("Status {} already inactive", uuid);
        }
        Ok(())
    }

    /// All-or-nothing: every entry must name an active status the caller can
    /// see before any order changes.
    pub async fn reorder(&self, orders: Vec<StatusOrder>, caller_company: Option<&str>) -> Result<(), DomainError> {
        for entry in &orders {
            entry.validate()?;
        }

        let mut seen = HashSet::new();
        for entry in &orders {
            if seen.insert(entry.uuid) {
                self.get(&entry.uuid, caller_company).await?;
            }
        }

        if orders.is_empty() {
            debug!("Empty reorder request");
            return Ok(());
        }

        self.statuses.reorder(&orders).await?;
        info!("Reordered {} statuses", orders.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::MockRepos;
    use mockall::predicate::eq;

    fn board() -> Board {
        Board::new("Sales".into(), Some("acme".into()))
    }

    fn create(board: &Board, order: Option<i32>) -> CreateStatus {
        CreateStatus { name: "New".into(), board: board.uuid, order }
    }

    #[tokio::test]
    async fn test_first_status_gets_order_one() {
        let b = board();
        let mut mocks = MockRepos::new();
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.statuses.expect_max_order().with(eq(b.uuid)).returning(|_| Ok(None));
        mocks.statuses.expect_create().returning(|s| Ok(s.clone()));
        let service = StatusService::new(&mocks.build());

        let status = service.create(create(&b, None), None).await.unwrap();
        assert_eq!(status.order, 1);
        assert_eq!(status.board, b.uuid);
        assert_eq!(status.board_name, "Sales");
    }

    #[tokio::test]
    async fn test_next_status_goes_after_max() {
        let b = board();
        let mut mocks = MockRepos::new();
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.statuses.expect_max_order().returning(|_| Ok(Some(4)));
        mocks.statuses.expect_create().returning(|s| Ok(s.clone()));
        let service = StatusService::new(&mocks.build());

        assert_eq!(service.create(create(&b, None), None).await.unwrap().order, 5);
    }

    #[tokio::test]
    async fn test_explicit_order_skips_lookup() {
        let b = board();
        let mut mocks = MockRepos::new();
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.statuses.expect_max_order().times(0);
        mocks.statuses.expect_create().returning(|s| Ok(s.clone()));
        let service = StatusService::new(&mocks.build());

        assert_eq!(service.create(create(&b, Some(9)), None).await.unwrap().order, 9);
    }

    #[tokio::test]
    async fn test_failed_sibling_lookup_starts_at_one() {
        let b = board();
        let mut mocks = MockRepos::new();
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks
            .statuses
            .expect_max_order()
            .returning(|_| Err(DomainError::DatabaseError("timeout".into())));
        mocks.statuses.expect_create().returning(|s| Ok(s.clone()));
        let service = StatusService::new(&mocks.build());

        assert_eq!(service.create(create(&b, None), None).await.unwrap().order, 1);
    }

    #[tokio::test]
    async fn test_create_on_inactive_board_fails() {
        let mut b = board();
        b.is_active = false;
        let mut mocks = MockRepos::new();
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.statuses.expect_create().times(0);
        let service = StatusService::new(&mocks.build());

        assert!(matches!(
            service.create(create(&b, None), None).await,
            Err(DomainError::NotFound { entity: EntityKind::Board, .. })
        ));
    }

    #[tokio::test]
    async fn test_reorder_with_unknown_status_changes_nothing() {
        let b = board();
        let known = Status::new(&b, "New".into(), 1);
        let known_uuid = known.uuid;
        let unknown_uuid = Uuid::new_v4();

        let mut mocks = MockRepos::new();
        mocks.statuses.expect_find_by_uuid().returning(move |uuid| {
            Ok(if *uuid == known_uuid { Some(known.clone()) } else { None })
        });
        mocks.statuses.expect_reorder().times(0);
        let service = StatusService::new(&mocks.build());

        let result = service
            .reorder(
                vec![
                    StatusOrder { uuid: known_uuid, order: 2 },
                    StatusOrder { uuid: unknown_uuid, order: 1 },
                ],
                None,
            )
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { entity: EntityKind::Status, .. })));
    }

    #[tokio::test]
    async fn test_reorder_applies_all_entries() {
        let b = board();
        let first = Status::new(&b, "New".into(), 1);
        let second = Status::new(&b, "Won".into(), 2);
        let expected = vec![
            StatusOrder { uuid: second.uuid, order: 1 },
            StatusOrder { uuid: first.uuid, order: 2 },
        ];

        let mut mocks = MockRepos::new();
        let statuses = vec![first.clone(), second.clone()];
        mocks
            .statuses
            .expect_find_by_uuid()
            .returning(move |uuid| Ok(statuses.iter().find(|s| s.uuid == *uuid).cloned()));
        let check = expected.clone();
        mocks
            .statuses
            .expect_reorder()
            .withf(move |orders| orders == check.as_slice())
            .times(1)
            .returning(|_| Ok(()));
        let service = StatusService::new(&mocks.build());

        service.reorder(expected, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_status_of_other_company_is_hidden() {
        let b = board();
        let status = Status::new(&b, "New".into(), 1);
        let uuid = status.uuid;

        let mut mocks = MockRepos::new();
        mocks.statuses.expect_find_by_uuid().returning(move |_| Ok(Some(status.clone())));
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.statuses.expect_deactivate().times(0);
        mocks.statuses.expect_reorder().times(0);
        let service = StatusService::new(&mocks.build());

        assert!(service.get(&uuid, Some("acme")).await.is_ok());
        assert!(matches!(
            service.get(&uuid, Some("globex")).await,
            Err(DomainError::NotFound { entity: EntityKind::Status, .. })
        ));
        assert!(service.delete(&uuid, Some("globex")).await.is_err());
        assert!(service
            .reorder(vec![StatusOrder { uuid, order: 3 }], Some("globex"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_create_on_other_company_board_fails() {
        let b = board();
        let mut mocks = MockRepos::new();
        let found = b.clone();
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.statuses.expect_create().times(0);
        let service = StatusService::new(&mocks.build());

        assert!(matches!(
            service.create(create(&b, None), Some("globex")).await,
            Err(DomainError::NotFound { entity: EntityKind::Board, .. })
        ));
    }
}
