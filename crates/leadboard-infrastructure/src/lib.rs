//! # Leadboard Infrastructure
//! 
//! Store adapters: PostgreSQL repositories and an in-process store.

pub mod database;
pub mod memory;

pub use database::{create_pool, postgres_repositories, run_migrations};
pub use memory::InMemoryStore;
