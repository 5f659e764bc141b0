// ============================================================================
// Leadboard Core - Authentication Service
// File: crates/leadboard-core/src/services/auth_service.rs
// ============================================================================
//! Token issuing, refresh and account provisioning

use std::sync::Arc;

use leadboard_security::{Claims, JwtService, PasswordService, TokenPair};
use tracing::{info, warn};

use crate::domain::User;
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for the token endpoints and the bearer extractor
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: Arc<JwtService>) -> Self {
        Self { user_repo, jwt }
    }

    /// Exchanges username and password for an access/refresh pair
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, DomainError> {
        info!("Token request for username: {}", username);

        // 1. Find user by username
        let user = self.user_repo.find_by_username(username).await?.ok_or_else(|| {
            warn!("Login failed: unknown username: {}", username);
            DomainError::InvalidCredentials
        })?;

        // 2. Verify password
        let password_valid = PasswordService::verify(password, &user.password_hash)
            .map_err(|_e| DomainError::InvalidCredentials)?;
        if !password_valid {
            warn!("Login failed: invalid password for: {}", username);
            return Err(DomainError::InvalidCredentials);
        }

        // 3. Check if user can login
        if !user.is_active {
            warn!("Login failed: inactive account: {}", username);
            return Err(DomainError::UserNotActive);
        }

        // 4. Generate tokens
        let pair = self
            .jwt
            .generate_pair(&user.uuid, user.company_uuid.as_deref())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Tokens issued for: {}", username);
        Ok(pair)
    }

    /// Issues a new access token from a valid refresh token
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self
            .jwt
            .validate_refresh_token(refresh_token)
            .map_err(|e| DomainError::InvalidToken(e.to_string()))?;
        let user_id = claims.user_id().map_err(|e| DomainError::InvalidToken(e.to_string()))?;

        let user = self
            .user_repo
            .find_by_uuid(&user_id)
            .await?
            .ok_or_else(|| DomainError::InvalidToken("unknown subject".to_string()))?;
        if !user.is_active {
            return Err(DomainError::UserNotActive);
        }

        self.jwt
            .generate_access_token(&user.uuid, user.company_uuid.as_deref())
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))
    }

    /// Validates a bearer access token
    pub fn authenticate(&self, access_token: &str) -> Result<Claims, DomainError> {
        self.jwt
            .validate_access_token(access_token)
            .map_err(|e| DomainError::InvalidToken(e.to_string()))
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        company_uuid: Option<String>,
    ) -> Result<User, DomainError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(DomainError::ValidationError("Username and password are required".to_string()));
        }
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(DomainError::UsernameAlreadyExists(username.to_string()));
        }

        let password_hash =
            PasswordService::hash(password).map_err(|e| DomainError::PasswordHashError(e.to_string()))?;
        let user = self
            .user_repo
            .create(&User::new(username.to_string(), password_hash, company_uuid))
            .await?;

        info!("User created: {} ({})", user.username, user.uuid);
        Ok(user)
    }

    /// Creates the account unless the username is already taken.
    pub async fn ensure_user(
        &self,
        username: &str,
        password: &str,
        company_uuid: Option<String>,
    ) -> Result<(), DomainError> {
        match self.create_user(username, password, company_uuid).await {
            Ok(_) | Err(DomainError::UsernameAlreadyExists(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;

    fn jwt() -> Arc<JwtService> {
        Arc::new(JwtService::new("test-secret", 900, 3600))
    }

    fn user(password: &str, active: bool) -> User {
        let mut user = User::new(
            "alice".into(),
            PasswordService::hash(password).unwrap(),
            Some("acme".into()),
        );
        user.is_active = active;
        user
    }

    fn repo_with(user: User) -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        let by_name = user.clone();
        repo.expect_find_by_username()
            .returning(move |name| Ok(Some(by_name.clone()).filter(|u| u.username == name)));
        repo.expect_find_by_uuid()
            .returning(move |uuid| Ok(Some(user.clone()).filter(|u| u.uuid == *uuid)));
        repo
    }

    #[tokio::test]
    async fn test_login_and_refresh() {
        let service = AuthService::new(Arc::new(repo_with(user("s3cret!", true))), jwt());

        let pair = service.login("alice", "s3cret!").await.unwrap();
        let claims = service.authenticate(&pair.access).unwrap();
        assert_eq!(claims.company_uuid.as_deref(), Some("acme"));

        let access = service.refresh(&pair.refresh).await.unwrap();
        assert!(service.authenticate(&access).is_ok());
        assert!(matches!(service.refresh(&pair.access).await, Err(DomainError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let service = AuthService::new(Arc::new(repo_with(user("s3cret!", true))), jwt());
        assert!(matches!(service.login("alice", "wrong").await, Err(DomainError::InvalidCredentials)));
        assert!(matches!(service.login("bob", "s3cret!").await, Err(DomainError::InvalidCredentials)));

        let inactive = AuthService::new(Arc::new(repo_with(user("s3cret!", false))), jwt());
        assert!(matches!(inactive.login("alice", "s3cret!").await, Err(DomainError::UserNotActive)));
    }

    #[tokio::test]
    async fn test_ensure_user_tolerates_existing() {
        let service = AuthService::new(Arc::new(repo_with(user("s3cret!", true))), jwt());
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create().times(1).returning(|u| Ok(u.clone()));
        let fresh = AuthService::new(Arc::new(repo), jwt());

        service.ensure_user("alice", "whatever", None).await.unwrap();
        fresh.ensure_user("carol", "pw", None).await.unwrap();
    }
}
