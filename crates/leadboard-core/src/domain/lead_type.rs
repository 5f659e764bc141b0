// ============================================================================
// Leadboard Core - Lead Type Entity
// File: crates/leadboard-core/src/domain/lead_type.rs
// Description: Ordered category within a status
// ============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Status;

/// Lead type entity. `status_name` is read-only, resolved from the parent status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadType {
    pub uuid: Uuid,
    pub status: Uuid,
    pub status_name: String,
    pub name: String,
    pub description: String,
    pub order: i32,

    #[serde(skip_serializing)]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeadType {
    pub fn new(status: &Status, name: String, description: String, order: i32) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            status: status.uuid,
            status_name: status.name.clone(),
            name: name.trim().to_string(),
            description,
            order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn move_to(&mut self, status: &Status) {
        self.status = status.uuid;
        self.status_name = status.name.clone();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
