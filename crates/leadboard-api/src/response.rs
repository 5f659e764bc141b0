//! Response bodies shared by several handlers

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// `"<Entity> deleted successfully"`
    pub fn deleted(entity: impl std::fmt::Display) -> Self {
        Self::new(format!("{} deleted successfully", entity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadboard_core::EntityKind;

    #[test]
    fn test_deleted_message() {
        assert_eq!(MessageResponse::deleted(EntityKind::LeadType).message, "Lead type deleted successfully");
    }
}
