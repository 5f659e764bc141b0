//! Table storage and the joins the SQL adapters get from the database.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use leadboard_core::domain::{Board, Lead, LeadHistory, LeadType, ListFilter, Status, User};

#[derive(Default)]
pub(super) struct Tables {
    pub boards: HashMap<Uuid, Board>,
    pub statuses: HashMap<Uuid, Status>,
    pub lead_types: HashMap<Uuid, LeadType>,
    pub leads: HashMap<Uuid, Lead>,
    pub histories: HashMap<Uuid, LeadHistory>,
    pub users: HashMap<Uuid, User>,
}

/// `order` ascending, then newest first.
pub(super) fn by_order(a: (i32, DateTime<Utc>), b: (i32, DateTime<Utc>)) -> Ordering {
    a.0.cmp(&b.0).then(b.1.cmp(&a.1))
}

impl Tables {
    fn board_of_status(&self, status: &Uuid) -> Option<&Board> {
        self.statuses.get(status).and_then(|s| self.boards.get(&s.board))
    }

    fn status_of_lead_type(&self, lead_type: &Uuid) -> Option<&Status> {
        self.lead_types.get(lead_type).and_then(|t| self.statuses.get(&t.status))
    }

    fn company_matches(filter: &ListFilter, board: Option<&Board>) -> bool {
        match filter.company_uuid.as_deref() {
            None => true,
            Some(company) => board.and_then(|b| b.company_uuid.as_deref()) == Some(company),
        }
    }

    pub fn board_matches(&self, board: &Board, filter: &ListFilter) -> bool {
        board.is_active && Self::company_matches(filter, Some(board))
    }

    pub fn status_matches(&self, status: &Status, filter: &ListFilter) -> bool {
        status.is_active
            && filter.board.map_or(true, |b| status.board == b)
            && Self::company_matches(filter, self.boards.get(&status.board))
    }

    pub fn lead_type_matches(&self, lead_type: &LeadType, filter: &ListFilter) -> bool {
        let board = self.board_of_status(&lead_type.status);
        lead_type.is_active
            && filter.status.map_or(true, |s| lead_type.status == s)
            && filter.board.map_or(true, |b| board.map(|x| x.uuid) == Some(b))
            && Self::company_matches(filter, board)
    }

    pub fn lead_matches(&self, lead: &Lead, filter: &ListFilter) -> bool {
        let status = self.status_of_lead_type(&lead.lead_type);
        let board = status.and_then(|s| self.boards.get(&s.board));
        lead.is_active
            && filter.lead_type.map_or(true, |t| lead.lead_type == t)
            && filter.status.map_or(true, |s| status.map(|x| x.uuid) == Some(s))
            && filter.board.map_or(true, |b| board.map(|x| x.uuid) == Some(b))
            && Self::company_matches(filter, board)
    }

    pub fn history_matches(&self, history: &LeadHistory, filter: &ListFilter) -> bool {
        history.is_active
            && filter.lead.map_or(true, |l| history.lead == l)
            && Self::company_matches(filter, self.board_of_status(&history.status))
    }

    pub fn hydrate_status(&self, mut status: Status) -> Status {
        if let Some(board) = self.boards.get(&status.board) {
            status.board_name = board.name.clone();
        }
        status
    }

    pub fn hydrate_lead_type(&self, mut lead_type: LeadType) -> LeadType {
        if let Some(status) = self.statuses.get(&lead_type.status) {
            lead_type.status_name = status.name.clone();
        }
        lead_type
    }

    pub fn hydrate_lead(&self, mut lead: Lead) -> Lead {
        if let Some(lead_type) = self.lead_types.get(&lead.lead_type) {
            lead.type_name = lead_type.name.clone();
        }
        lead
    }

    pub fn hydrate_history(&self, mut history: LeadHistory) -> LeadHistory {
        if let Some(lead) = self.leads.get(&history.lead) {
            history.lead_title = lead.title.clone();
        }
        if let Some(status) = self.statuses.get(&history.status) {
            history.status_name = status.name.clone();
        }
        if let Some(lead_type) = self.lead_types.get(&history.lead_type) {
            history.lead_type_name = lead_type.name.clone();
        }
        history
    }

    pub fn leads_matching(&self, filter: &ListFilter) -> Vec<Lead> {
        let mut leads: Vec<Lead> = self
            .leads
            .values()
            .filter(|l| self.lead_matches(l, filter))
            .map(|l| self.hydrate_lead(l.clone()))
            .collect();
        leads.sort_by(|a, b| by_order((a.order, a.created_at), (b.order, b.created_at)));
        leads
    }
}
