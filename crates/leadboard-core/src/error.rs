//! Domain errors

use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Board,
    Status,
    LeadType,
    Lead,
    LeadHistory,
    User,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Board => "Board",
            EntityKind::Status => "Status",
            EntityKind::LeadType => "Lead type",
            EntityKind::Lead => "Lead",
            EntityKind::LeadHistory => "Lead history",
            EntityKind::User => "User",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User account is inactive.")]
    UserNotActive,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Token generation error: {0}")]
    TokenGenerationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        DomainError::NotFound { entity, id: id.to_string() }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_not_found_message_names_entity() {
        let id = Uuid::nil();
        let err = DomainError::not_found(EntityKind::LeadType, id);
        assert_eq!(err.to_string(), format!("Lead type not found: {}", id));
    }
}
