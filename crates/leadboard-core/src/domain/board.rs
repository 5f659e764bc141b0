// ============================================================================
// Leadboard Core - Board Entity
// File: crates/leadboard-core/src/domain/board.rs
// Description: Top-level kanban board owned by a company
// ============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Board entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    pub uuid: Uuid,
    pub company_uuid: Option<String>,
    pub name: String,

    #[serde(skip_serializing)]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub fn new(name: String, company_uuid: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            company_uuid: company_uuid.map(|c| c.trim().to_string()),
            name: name.trim().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
