//! Port implementations over the in-process tables.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use leadboard_core::commands::{ClearRequest, StatusOrder};
use leadboard_core::domain::{Board, Lead, LeadHistory, LeadType, ListFilter, Status, User};
use leadboard_core::error::{DomainError, EntityKind};
use leadboard_core::repositories::{
    BoardRepository, ClearRepository, LeadHistoryRepository, LeadRepository, LeadTypeRepository,
    StatusRepository, StoreHealth, UserRepository,
};
use leadboard_shared::{Page, PageRequest};

use super::tables::by_order;
use super::InMemoryStore;

#[async_trait]
impl BoardRepository for InMemoryStore {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Board>, DomainError> {
        Ok(self.tables.read().boards.get(uuid).cloned())
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Board>, DomainError> {
        let tables = self.tables.read();
        let mut boards: Vec<Board> = tables
            .boards
            .values()
            .filter(|b| tables.board_matches(b, filter))
            .cloned()
            .collect();
        boards.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(boards)
    }

    async fn create(&self, board: &Board) -> Result<Board, DomainError> {
        self.tables.write().boards.insert(board.uuid, board.clone());
        Ok(board.clone())
    }

    async fn update(&self, board: &Board) -> Result<Board, DomainError> {
        let mut tables = self.tables.write();
        let stored = tables
            .boards
            .get_mut(&board.uuid)
            .ok_or_else(|| DomainError::not_found(EntityKind::Board, board.uuid))?;
        stored.company_uuid = board.company_uuid.clone();
        stored.name = board.name.clone();
        stored.updated_at = board.updated_at;
        Ok(stored.clone())
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        if let Some(board) = self.tables.write().boards.get_mut(uuid) {
            board.is_active = false;
            board.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl StatusRepository for InMemoryStore {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Status>, DomainError> {
        let tables = self.tables.read();
        Ok(tables.statuses.get(uuid).map(|s| tables.hydrate_status(s.clone())))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Status>, DomainError> {
        let tables = self.tables.read();
        let mut statuses: Vec<Status> = tables
            .statuses
            .values()
            .filter(|s| tables.status_matches(s, filter))
            .map(|s| tables.hydrate_status(s.clone()))
            .collect();
        statuses.sort_by(|a, b| by_order((a.order, a.created_at), (b.order, b.created_at)));
        Ok(statuses)
    }

    async fn max_order(&self, board: &Uuid) -> Result<Option<i32>, DomainError> {
        let tables = self.tables.read();
        Ok(tables
            .statuses
            .values()
            .filter(|s| s.is_active && s.board == *board)
            .map(|s| s.order)
            .max())
    }

    async fn create(&self, status: &Status) -> Result<Status, DomainError> {
        let mut tables = self.tables.write();
        if !tables.boards.contains_key(&status.board) {
            return Err(DomainError::not_found(EntityKind::Board, status.board));
        }
        tables.statuses.insert(status.uuid, status.clone());
        Ok(tables.hydrate_status(status.clone()))
    }

    async fn update(&self, status: &Status) -> Result<Status, DomainError> {
        let mut tables = self.tables.write();
        if !tables.boards.contains_key(&status.board) {
            return Err(DomainError::not_found(EntityKind::Board, status.board));
        }
        let stored = tables
            .statuses
            .get_mut(&status.uuid)
            .ok_or_else(|| DomainError::not_found(EntityKind::Status, status.uuid))?;
        stored.board = status.board;
        stored.name = status.name.clone();
        stored.order = status.order;
        stored.updated_at = status.updated_at;
        let updated = stored.clone();
        Ok(tables.hydrate_status(updated))
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        if let Some(status) = self.tables.write().statuses.get_mut(uuid) {
            status.is_active = false;
            status.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn reorder(&self, orders: &[StatusOrder]) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        if let Some(missing) = orders
            .iter()
            .find(|o| !tables.statuses.get(&o.uuid).is_some_and(|s| s.is_active))
        {
            return Err(DomainError::not_found(EntityKind::Status, missing.uuid));
        }

        let now = Utc::now();
        for entry in orders {
            if let Some(status) = tables.statuses.get_mut(&entry.uuid) {
                status.order = entry.order;
                status.updated_at = now;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LeadTypeRepository for InMemoryStore {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<LeadType>, DomainError> {
        let tables = self.tables.read();
        Ok(tables.lead_types.get(uuid).map(|t| tables.hydrate_lead_type(t.clone())))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<LeadType>, DomainError> {
        let tables = self.tables.read();
        let mut lead_types: Vec<LeadType> = tables
            .lead_types
            .values()
            .filter(|t| tables.lead_type_matches(t, filter))
            .map(|t| tables.hydrate_lead_type(t.clone()))
            .collect();
        lead_types.sort_by(|a, b| by_order((a.order, a.created_at), (b.order, b.created_at)));
        Ok(lead_types)
    }

    async fn max_order(&self, status: &Uuid) -> Result<Option<i32>, DomainError> {
        let tables = self.tables.read();
        Ok(tables
            .lead_types
            .values()
            .filter(|t| t.is_active && t.status == *status)
            .map(|t| t.order)
            .max())
    }

    async fn create(&self, lead_type: &LeadType) -> Result<LeadType, DomainError> {
        let mut tables = self.tables.write();
        if !tables.statuses.contains_key(&lead_type.status) {
            return Err(DomainError::not_found(EntityKind::Status, lead_type.status));
        }
        tables.lead_types.insert(lead_type.uuid, lead_type.clone());
        Ok(tables.hydrate_lead_type(lead_type.clone()))
    }

    async fn update(&self, lead_type: &LeadType) -> Result<LeadType, DomainError> {
        let mut tables = self.tables.write();
        if !tables.statuses.contains_key(&lead_type.status) {
            return Err(DomainError::not_found(EntityKind::Status, lead_type.status));
        }
        let stored = tables
            .lead_types
            .get_mut(&lead_type.uuid)
            .ok_or_else(|| DomainError::not_found(EntityKind::LeadType, lead_type.uuid))?;
        stored.status = lead_type.status;
        stored.name = lead_type.name.clone();
        stored.description = lead_type.description.clone();
        stored.order = lead_type.order;
        stored.updated_at = lead_type.updated_at;
        let updated = stored.clone();
        Ok(tables.hydrate_lead_type(updated))
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        if let Some(lead_type) = self.tables.write().lead_types.get_mut(uuid) {
            lead_type.is_active = false;
            lead_type.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl LeadRepository for InMemoryStore {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<Lead>, DomainError> {
        let tables = self.tables.read();
        Ok(tables.leads.get(uuid).map(|l| tables.hydrate_lead(l.clone())))
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Lead>, DomainError> {
        Ok(self.tables.read().leads_matching(filter))
    }

    async fn page(&self, filter: &ListFilter, request: PageRequest) -> Result<Page<Lead>, DomainError> {
        let leads = self.tables.read().leads_matching(filter);
        Ok(Page::from_vec(leads, request))
    }

    async fn create(&self, lead: &Lead) -> Result<Lead, DomainError> {
        let mut tables = self.tables.write();
        if !tables.lead_types.contains_key(&lead.lead_type) {
            return Err(DomainError::not_found(EntityKind::LeadType, lead.lead_type));
        }
        tables.leads.insert(lead.uuid, lead.clone());
        Ok(tables.hydrate_lead(lead.clone()))
    }

    async fn update(&self, lead: &Lead, history: Option<LeadHistory>) -> Result<Lead, DomainError> {
        let mut tables = self.tables.write();
        if !tables.lead_types.contains_key(&lead.lead_type) {
            return Err(DomainError::not_found(EntityKind::LeadType, lead.lead_type));
        }
        let stored = tables
            .leads
            .get_mut(&lead.uuid)
            .ok_or_else(|| DomainError::not_found(EntityKind::Lead, lead.uuid))?;
        let is_active = stored.is_active;
        let created_at = stored.created_at;
        *stored = Lead { is_active, created_at, ..lead.clone() };

        if let Some(history) = history {
            tables.histories.insert(history.uuid, history);
        }

        Ok(tables.hydrate_lead(lead.clone()))
    }

    async fn deactivate(&self, uuid: &Uuid) -> Result<(), DomainError> {
        if let Some(lead) = self.tables.write().leads.get_mut(uuid) {
            lead.is_active = false;
            lead.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[async_trait]
impl LeadHistoryRepository for InMemoryStore {
    async fn page(&self, filter: &ListFilter, request: PageRequest) -> Result<Page<LeadHistory>, DomainError> {
        let tables = self.tables.read();
        let mut histories: Vec<LeadHistory> = tables
            .histories
            .values()
            .filter(|h| tables.history_matches(h, filter))
            .map(|h| tables.hydrate_history(h.clone()))
            .collect();
        histories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::from_vec(histories, request))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_uuid(&self, uuid: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().users.get(uuid).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, DomainError> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists(user.username.clone()));
        }
        tables.users.insert(user.uuid, user.clone());
        Ok(user.clone())
    }
}

#[async_trait]
impl ClearRepository for InMemoryStore {
    async fn deactivate_all(&self, targets: &ClearRequest) -> Result<(), DomainError> {
        let mut tables = self.tables.write();
        let now = Utc::now();
        if let Some(board) = targets.board_uuid.and_then(|u| tables.boards.get_mut(&u)) {
            board.is_active = false;
            board.updated_at = now;
        }
        if let Some(status) = targets.status_uuid.and_then(|u| tables.statuses.get_mut(&u)) {
            status.is_active = false;
            status.updated_at = now;
        }
        if let Some(lead_type) = targets.leadtype_uuid.and_then(|u| tables.lead_types.get_mut(&u)) {
            lead_type.is_active = false;
            lead_type.updated_at = now;
        }
        if let Some(lead) = targets.lead_uuid.and_then(|u| tables.leads.get_mut(&u)) {
            lead.is_active = false;
            lead.updated_at = now;
        }
        Ok(())
    }
}

#[async_trait]
impl StoreHealth for InMemoryStore {
    async fn ping(&self) -> Result<(), DomainError> {
        debug!("In-memory store ping");
        Ok(())
    }
}
