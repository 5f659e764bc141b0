//! In-process store
//!
//! Keeps every table in one `RwLock` so multi-row writes (status reorder,
//! lead move with its history row, clear) are applied atomically. Selected with
//! `database.backend = "memory"`; nothing survives a restart.

mod tables;
mod repos;

use std::sync::Arc;

use parking_lot::RwLock;

use leadboard_core::repositories::Repositories;

use tables::Tables;

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every port backed by this store.
    pub fn repositories(&self) -> Repositories {
        let store = Arc::new(self.clone());
        Repositories {
            boards: store.clone(),
            statuses: store.clone(),
            lead_types: store.clone(),
            leads: store.clone(),
            histories: store.clone(),
            users: store.clone(),
            clear: store.clone(),
            health: store,
        }
    }
}
