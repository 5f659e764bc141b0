// ============================================================================
// Leadboard Core - Lead Service
// File: crates/leadboard-core/src/services/lead_service.rs
// ============================================================================
//! Lead CRUD and history tracking when a lead changes lead type

use std::sync::Arc;

use leadboard_shared::{Page, PageRequest};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

use super::scope::CompanyScope;
use crate::commands::{CreateLead, UpdateLead};
use crate::domain::{Lead, LeadHistory, LeadType, ListFilter};
use crate::error::{DomainError, EntityKind};
use crate::repositories::{LeadRepository, LeadTypeRepository, Repositories};

pub struct LeadService {
    leads: Arc<dyn LeadRepository>,
    lead_types: Arc<dyn LeadTypeRepository>,
    scope: CompanyScope,
}

impl LeadService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            leads: repos.leads.clone(),
            lead_types: repos.lead_types.clone(),
            scope: CompanyScope::new(repos),
        }
    }

    pub async fn list(
        &self,
        filter: &ListFilter,
        request: PageRequest,
        caller_company: Option<&str>,
    ) -> Result<Page<Lead>, DomainError> {
        match filter.clone().within_company(caller_company) {
            Some(filter) => self.leads.page(&filter, request).await,
            None => Ok(Page::new(Vec::new(), 0, request)),
        }
    }

    pub async fn get(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<Lead, DomainError> {
        if let Some(lead) = self.leads.find_by_uuid(uuid).await?.filter(|l| l.is_active) {
            if self.scope.lead_type(&lead.lead_type, caller_company).await? {
                return Ok(lead);
            }
        }
        Err(DomainError::not_found(EntityKind::Lead, uuid))
    }

    async fn active_lead_type(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<LeadType, DomainError> {
        if let Some(lead_type) = self.lead_types.find_by_uuid(uuid).await?.filter(|lt| lt.is_active) {
            if self.scope.status(&lead_type.status, caller_company).await? {
                return Ok(lead_type);
            }
        }
        Err(DomainError::not_found(EntityKind::LeadType, uuid))
    }

    pub async fn create(&self, cmd: CreateLead, caller_company: Option<&str>) -> Result<Lead, DomainError> {
        cmd.validate()?;
        let lead_type = self.active_lead_type(&cmd.lead_type, caller_company).await?;

        let mut lead = Lead::new(&lead_type, cmd.title);
        lead.phone_number = cmd.phone_number;
        lead.gender = cmd.gender;
        lead.birth_date = cmd.birth_date;
        lead.description = cmd.description;
        lead.extra = cmd.extra.unwrap_or_default();
        lead.order = cmd.order.unwrap_or_default();

        let lead = self.leads.create(&lead).await?;
        info!("Lead created: {} under lead type {}", lead.uuid, lead_type.uuid);
        Ok(lead)
    }

    /// Partial update. When `type` names a different lead type, the lead type the
    /// lead leaves (and its status) is recorded in the history with the update.
    pub async fn update(
        &self,
        uuid: &Uuid,
        patch: UpdateLead,
        caller_company: Option<&str>,
    ) -> Result<Lead, DomainError> {
        patch.validate()?;
        let mut lead = self.get(uuid, caller_company).await?;

        let mut history = None;
        if let Some(type_uuid) = patch.lead_type {
            let target = self.active_lead_type(&type_uuid, caller_company).await?;
            if target.uuid != lead.lead_type {
                let previous = self
                    .lead_types
                    .find_by_uuid(&lead.lead_type)
                    .await?
                    .ok_or_else(|| DomainError::not_found(EntityKind::LeadType, lead.lead_type))?;
                history = Some(LeadHistory::record_move(&lead, &previous));
                lead.move_to(&target);
            } else {
                debug!("Lead {} already under lead type {}", lead.uuid, type_uuid);
            }
        }

        if let Some(title) = patch.title {
            lead.title = title.trim().to_string();
        }
        if let Some(phone_number) = patch.phone_number {
            lead.phone_number = phone_number;
        }
        if let Some(gender) = patch.gender {
            lead.gender = gender;
        }
        if let Some(birth_date) = patch.birth_date {
            lead.birth_date = birth_date;
        }
        if let Some(description) = patch.description {
            lead.description = description;
        }
        if let Some(extra) = patch.extra {
            lead.extra = extra;
        }
        if let Some(order) = patch.order {
            lead.order = order;
        }
        lead.touch();

        if let Some(entry) = &history {
            info!(
                "Lead {} moved from lead type {} (status {})",
                lead.uuid, entry.lead_type, entry.status
            );
        }
        self.leads.update(&lead, history).await
    }

    pub async fn delete(&self, uuid: &Uuid, caller_company: Option<&str>) -> Result<(), DomainError> {
        let lead = self
            .leads
            .find_by_uuid(uuid)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Lead, uuid))?;
        if !self.scope.lead_type(&lead.lead_type, caller_company).await? {
            return Err(DomainError::not_found(EntityKind::Lead, uuid));
        }
        if lead.is_active {
            self.leads.deactivate(uuid).await?;
            info!("Lead deactivated: {}", uuid);
        } else {
            debug!("Lead {} already inactive", uuid);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Board, Gender, Status};
    use crate::services::test_support::MockRepos;
    use chrono::NaiveDate;
    use serde_json::json;

    struct Fixture {
        status: Status,
        from: LeadType,
        to: LeadType,
        lead: Lead,
    }

    fn fixture() -> Fixture {
        let board = Board::new("Sales".into(), None);
        let status = Status::new(&board, "New".into(), 1);
        let other_status = Status::new(&board, "Won".into(), 2);
        let from = LeadType::new(&status, "Inbound".into(), String::new(), 1);
        let to = LeadType::new(&other_status, "Closed".into(), String::new(), 1);
        let lead = Lead::new(&from, "ACME".into());
        Fixture { status, from, to, lead }
    }

    fn mocks_for(f: &Fixture) -> MockRepos {
        let mut mocks = MockRepos::new();
        let lead = f.lead.clone();
        mocks.leads.expect_find_by_uuid().returning(move |_| Ok(Some(lead.clone())));
        let types = vec![f.from.clone(), f.to.clone()];
        mocks
            .lead_types
            .expect_find_by_uuid()
            .returning(move |uuid| Ok(types.iter().find(|t| t.uuid == *uuid).cloned()));
        mocks
    }

    #[tokio::test]
    async fn test_type_change_records_previous_type_and_status() {
        let f = fixture();
        let mut mocks = mocks_for(&f);
        let (lead_uuid, from_uuid, status_uuid) = (f.lead.uuid, f.from.uuid, f.status.uuid);
        mocks
            .leads
            .expect_update()
            .withf(move |_, history| {
                history.as_ref().is_some_and(|h| {
                    h.lead == lead_uuid && h.lead_type == from_uuid && h.status == status_uuid
                })
            })
            .times(1)
            .returning(|lead, _| Ok(lead.clone()));
        let service = LeadService::new(&mocks.build());

        let updated = service
            .update(&f.lead.uuid, UpdateLead { lead_type: Some(f.to.uuid), ..Default::default() }, None)
            .await
            .unwrap();
        assert_eq!(updated.lead_type, f.to.uuid);
        assert_eq!(updated.type_name, "Closed");
    }

    #[tokio::test]
    async fn test_same_type_records_nothing() {
        let f = fixture();
        let mut mocks = mocks_for(&f);
        mocks
            .leads
            .expect_update()
            .withf(|_, history| history.is_none())
            .times(1)
            .returning(|lead, _| Ok(lead.clone()));
        let service = LeadService::new(&mocks.build());

        service
            .update(&f.lead.uuid, UpdateLead { lead_type: Some(f.from.uuid), ..Default::default() }, None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_other_fields_record_nothing() {
        let f = fixture();
        let mut mocks = mocks_for(&f);
        mocks
            .leads
            .expect_update()
            .withf(|_, history| history.is_none())
            .times(1)
            .returning(|lead, _| Ok(lead.clone()));
        let service = LeadService::new(&mocks.build());

        let updated = service
            .update(
                &f.lead.uuid,
                UpdateLead {
                    title: Some("ACME Corp".into()),
                    extra: Some(json!({ "source": "fair" }).as_object().unwrap().clone()),
                    ..Default::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "ACME Corp");
        assert_eq!(updated.extra["source"], "fair");
    }

    #[tokio::test]
    async fn test_unknown_type_fails_before_any_write() {
        let f = fixture();
        let mut mocks = mocks_for(&f);
        mocks.leads.expect_update().times(0);
        let service = LeadService::new(&mocks.build());

        let result = service
            .update(&f.lead.uuid, UpdateLead { lead_type: Some(Uuid::new_v4()), ..Default::default() }, None)
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { entity: EntityKind::LeadType, .. })));
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let f = fixture();
        let mut mocks = mocks_for(&f);
        mocks.leads.expect_create().returning(|lead| Ok(lead.clone()));
        let service = LeadService::new(&mocks.build());

        let lead = service
            .create(
                CreateLead {
                    title: "Globex".into(),
                    lead_type: f.from.uuid,
                    phone_number: None,
                    gender: None,
                    birth_date: None,
                    description: String::new(),
                    extra: None,
                    order: None,
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(lead.order, 0);
        assert!(lead.extra.is_empty());
        assert_eq!(lead.type_name, "Inbound");
    }

    #[tokio::test]
    async fn test_null_fields_are_cleared_missing_fields_kept() {
        let mut f = fixture();
        f.lead.phone_number = Some("+1 555 0100".into());
        f.lead.gender = Some(Gender::Male);
        f.lead.birth_date = NaiveDate::from_ymd_opt(1990, 1, 1);
        let mut mocks = mocks_for(&f);
        mocks.leads.expect_update().returning(|lead, _| Ok(lead.clone()));
        let service = LeadService::new(&mocks.build());

        let patch: UpdateLead = serde_json::from_value(json!({ "phone_number": null, "gender": null })).unwrap();
        let updated = service.update(&f.lead.uuid, patch, None).await.unwrap();
        assert_eq!(updated.phone_number, None);
        assert_eq!(updated.gender, None);
        assert_eq!(updated.birth_date, NaiveDate::from_ymd_opt(1990, 1, 1));
    }

    #[tokio::test]
    async fn test_lead_of_other_company_is_hidden() {
        let f = fixture();
        let mut mocks = mocks_for(&f);
        let status = f.status.clone();
        mocks.statuses.expect_find_by_uuid().returning(move |_| Ok(Some(status.clone())));
        mocks
            .boards
            .expect_find_by_uuid()
            .returning(|_| Ok(Some(Board::new("Sales".into(), Some("acme".into())))));
        mocks.leads.expect_update().times(0);
        mocks.leads.expect_deactivate().times(0);
        let service = LeadService::new(&mocks.build());

        assert!(service.get(&f.lead.uuid, Some("acme")).await.is_ok());
        assert!(matches!(
            service.get(&f.lead.uuid, Some("globex")).await,
            Err(DomainError::NotFound { entity: EntityKind::Lead, .. })
        ));
        let patch = UpdateLead { title: Some("Taken".into()), ..Default::default() };
        assert!(service.update(&f.lead.uuid, patch, Some("globex")).await.is_err());
        assert!(service.delete(&f.lead.uuid, Some("globex")).await.is_err());
    }
}
