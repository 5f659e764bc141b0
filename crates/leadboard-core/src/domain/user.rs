//! User domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account allowed to obtain tokens. Not serializable: it carries the password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub uuid: Uuid,
    pub username: String,
    pub password_hash: String,
    pub company_uuid: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, company_uuid: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            username: username.trim().to_string(),
            password_hash,
            company_uuid,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
