//! Lead type CRUD and order assignment

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::ordering::resolve_order;
use super::scope::CompanyScope;
use crate::commands::{CreateLeadType, UpdateLeadType};
use crate::domain::{LeadType, ListFilter, Status};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{LeadTypeRepository, Repositories, StatusRepository};

pub struct LeadTypeService {
    lead_types: Arc<dyn LeadTypeRepository>,
    statuses: Arc<dyn StatusRepository>,
    scope: CompanyScope,
}

impl LeadTypeService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            lead_types: repos.lead_types.clone(),
            statuses: repos.statuses.clone(),
            scope: CompanyScope::new(repos),
        }
    }

    pub async fn list(&self, filter: &ListFilter, caller_company: Option<&str>) -> Result<Vec<LeadType>, DomainError> {
        match filter.clone().within_company(caller_company) {
            Some(filter) => self.lead_types.list(&filter).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<LeadType, DomainError> {
        if let Some(lead_type) = self.lead_types.find_by_uuid(uuid).await?.filter(|lt| lt.is_active) {
            if self.scope.status(&lead_type.status, caller_company).await? {
                return Ok(lead_type);
            }
        }
        Err(DomainError::not_found(EntityKind::LeadType, uuid))
    }

    async fn active_status(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<Status, DomainError> {
        if let Some(status) = self.statuses.find_by_uuid(uuid).await?.filter(|s| s.is_active) {
            if self.scope.board(&status.board, caller_company).await? {
                return Ok(status);
            }
        }
        Err(DomainError::not_found(EntityKind::Status, uuid))
    }

    pub async fn create(&self, cmd: CreateLeadType, caller_company: Option<&str>) -> Result<LeadType, DomainError> {
        cmd.validate()?;
        let status = self.active_status(&cmd.status, caller_company).await?;
        let order = match cmd.order {
            Some(order) => order,
            None => resolve_order(None, self.lead_types.max_order(&status.uuid).await),
        };

        let lead_type = LeadType::new(&status, cmd.name, cmd.description, order);
        let lead_type = self.lead_types.create(&lead_type).await?;
        info!("Lead type created: {} under status {} (order {})", lead_type.uuid, status.uuid, lead_type.order);
        Ok(lead_type)
    }

    pub async fn update(
        &self,
        uuid: &Uuid,
        patch: UpdateLeadType,
        caller_company: Option<&str>,
    ) -> Result<LeadType, DomainError> {
        patch.validate()?;
        let mut lead_type = self.get(uuid, caller_company).await?;
        if let Some(status_uuid) = patch.status {
            let status = self.active_status(&status_uuid, caller_company).await?;
            lead_type.move_to(&status);
        }
        if let Some(name) = patch.name {
            lead_type.name = name.trim().to_string();
        }
        if let Some(description) = patch.description {
            lead_type.description = description;
        }
        if let Some(order) = patch.order {
            lead_type.order = order;
        }
        lead_type.touch();
        self.lead_types.update(&lead_type).await
    }

    /// Soft delete. Leads of the lead type are left untouched.
    pub async fn delete(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<(), DomainError> {
        let lead_type = self
            .lead_types
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::LeadType, uuid))?;
        if !self.scope.status(&lead_type.status, caller_company).await? {
            return Err(DomainError::not_found(EntityKind::LeadType, uuid));
        }
        if lead_type.is_active {
            self.lead_types.deactivate(uuid).await?;
            info!("Lead type deactivated: {}", uuid);
        } else {
            debug!("Lead type {} already inactive", uuid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Board;
    use crate::services::test_support::MockRepos;
    use mockall::predicate::eq;

    fn status() -> Status {
        Status::new(&Board::new("Sales".into(), None), "New".into(), 1)
    }

    #[tokio::test]
    async fn test_lead_type_order_follows_active_siblings() {
        let s = status();
        let mut mocks = MockRepos::new();
        let found = s.clone();
        mocks.statuses.expect_find_by_uuid().returning(move |_| Ok(Some(found.clone())));
        mocks.lead_types.expect_max_order().with(eq(s.uuid)).returning(|_| Ok(Some(2)));
        mocks.lead_types.expect_create().returning(|lt| Ok(lt.clone()));
        let service = LeadTypeService::new(&mocks.build());

        let lead_type = service
            .create(
                CreateLeadType {
                    name: "Inbound".into(),
                    status: s.uuid,
                    description: "From the website".into(),
                    order: None,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(lead_type.order, 3);
        assert_eq!(lead_type.status_name, "New");
    }

    #[tokio::test]
    async fn test_update_moves_to_active_status_only() {
        let s = status();
        let current = LeadType::new(&s, "Inbound".into(), String::new(), 1);
        let uuid = current.uuid;
        let mut target = status();
        target.is_active = false;
        let target_uuid = target.uuid;

        let mut mocks = MockRepos::new();
        mocks.lead_types.expect_find_by_uuid().returning(move |_| Ok(Some(current.clone())));
        mocks.statuses.expect_find_by_uuid().returning(move |_| Ok(Some(target.clone())));
        mocks.lead_types.expect_update().times(0);
        let service = LeadTypeService::new(&mocks.build());

        let result = service
            .update(&uuid, UpdateLeadType { status: Some(target_uuid), ..Default::default() }, None)
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { entity: EntityKind::Status, .. })));
    }

    #[tokio::test]
    async fn test_delete_twice_deactivates_once() {
        let active = LeadType::new(&status(), "Inbound".into(), String::new(), 1);
        let uuid = active.uuid;
        let mut inactive = active.clone();
        inactive.is_active = false;

        let mut mocks = MockRepos::new();
        let mut calls = 0;
        mocks.lead_types.expect_find_by_uuid().returning(move |_| {
            calls += 1;
            Ok(Some(if calls == 1 { active.clone() } else { inactive.clone() }))
        });
        mocks.lead_types.expect_deactivate().times(1).returning(|_| Ok(()));
        let service = LeadTypeService::new(&mocks.build());

        service.delete(&uuid, None).await.unwrap();
        service.delete(&uuid, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_scope_follows_status_to_board() {
        let board = Board::new("Sales".into(), Some("acme".into()));
        let s = Status::new(&board, "New".into(), 1);
        let lead_type = LeadType::new(&s, "Inbound".into(), String::new(), 1);
        let uuid = lead_type.uuid;

        let mut mocks = MockRepos::new();
        mocks.lead_types.expect_find_by_uuid().returning(move |_| Ok(Some(lead_type.clone())));
        mocks.statuses.expect_find_by_uuid().returning(move |_| Ok(Some(s.clone())));
        mocks.boards.expect_find_by_uuid().returning(move |_| Ok(Some(board.clone())));
        mocks.lead_types.expect_update().times(0);
        let service = LeadTypeService::new(&mocks.build());

        assert!(service.get(&uuid, Some("acme")).await.is_ok());
        let patch = UpdateLeadType { name: Some("Taken".into()), ..Default::default() };
        assert!(matches!(
            service.update(&uuid, patch, Some("globex")).await,
            Err(DomainError::NotFound { entity: EntityKind::LeadType, .. })
        ));
    }
}
