use std::sync::Arc;

use leadboard_core::repositories::{Repositories, StoreHealth};
use leadboard_core::services::Services;
use leadboard_security::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new(repos: &Repositories, jwt: Arc<JwtService>) -> Self {
        Self {
            services: Services::new(repos, jwt),
            health: repos.health.clone(),
        }
    }
}
