// ============================================================================
// Leadboard Core - Status Entity
// File: crates/leadboard-core/src/domain/status.rs
// Description: Ordered column within a board
// ============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::Board;

/// Status entity. `board_name` is read-only, resolved from the parent board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub uuid: Uuid,
    pub board: Uuid,
    pub board_name: String,
    pub name: String,
    pub order: i32,

    #[serde(skip_serializing)]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Status {
    pub fn new(board: &Board, name: String, order: i32) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            board: board.uuid,
            board_name: board.name.clone(),
            name: name.trim().to_string(),
            order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn move_to(&mut self, board: &Board) {
        self.board = board.uuid;
        self.board_name = board.name.clone();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
