//! # Leadboard Core - Domain Module
//! 
//! Domain entities for the Leadboard application.

pub mod board;
pub mod status;
pub mod lead_type;
pub mod lead;
pub mod lead_history;
pub mod user;
pub mod filter;
pub mod overview;

// Re-export all entities and enums
pub use board::Board;
pub use status::Status;
pub use lead_type::LeadType;
pub use lead::{Gender, Lead};
pub use lead_history::LeadHistory;
pub use user::User;
pub use filter::ListFilter;
pub use overview::{BoardOverview, LeadTypeColumn, StatusColumn};
