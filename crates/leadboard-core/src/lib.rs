//! # Leadboard Core
//! 
//! Domain entities, commands, services, and repository traits for the Leadboard application.

pub mod commands;
pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::{DomainError, EntityKind};
pub use repositories::Repositories;
