//! Lead history entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Lead, LeadType};

/// Immutable record of the lead type (and its status) a lead was moved away from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadHistory {
    pub uuid: Uuid,
    pub lead: Uuid,
    pub lead_title: String,
    pub status: Uuid,
    pub status_name: String,
    pub lead_type: Uuid,
    pub lead_type_name: String,

    #[serde(skip_serializing)]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadHistory {
    /// Captures `previous` as the origin of a move of `lead`.
    pub fn record_move(lead: &Lead, previous: &LeadType) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            lead: lead.uuid,
            lead_title: lead.title.clone(),
            status: previous.status,
            status_name: previous.status_name.clone(),
            lead_type: previous.uuid,
            lead_type_name: previous.name.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
