//! JWT token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use leadboard_shared::constants::{TOKEN_TYPE_ACCESS, TOKEN_TYPE_REFRESH};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token creation failed: {0}")]
    CreationError(String),
    #[error("Token validation failed: {0}")]
    ValidationError(String),
    #[error("Token expired")]
    TokenExpired,
    #[error("Expected {expected} token, got {actual}")]
    WrongTokenType { expected: &'static str, actual: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_uuid: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|e| JwtError::ValidationError(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_expiry: i64, refresh_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry: access_expiry,
            refresh_token_expiry: refresh_expiry,
        }
    }

    pub fn generate_pair(&self, user_id: &Uuid, company_uuid: Option<&str>) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            refresh: self.generate_refresh_token(user_id, company_uuid)?,
            access: self.generate_access_token(user_id, company_uuid)?,
        })
    }

    pub fn generate_access_token(&self, user_id: &Uuid, company_uuid: Option<&str>) -> Result<String, JwtError> {
        self.generate_token(user_id, company_uuid, TOKEN_TYPE_ACCESS, self.access_token_expiry)
    }

    pub fn generate_refresh_token(&self, user_id: &Uuid, company_uuid: Option<&str>) -> Result<String, JwtError> {
        self.generate_token(user_id, company_uuid, TOKEN_TYPE_REFRESH, self.refresh_token_expiry)
    }

    fn generate_token(
        &self,
        user_id: &Uuid,
        company_uuid: Option<&str>,
        token_type: &str,
        expiry: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            company_uuid: company_uuid.map(str::to_string),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(expiry)).timestamp(),
            token_type: token_type.to_string(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::CreationError(e.to_string()))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::ValidationError(e.to_string()),
            })
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_typed(token, TOKEN_TYPE_ACCESS)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.validate_typed(token, TOKEN_TYPE_REFRESH)
    }

    fn validate_typed(&self, token: &str, expected: &'static str) -> Result<Claims, JwtError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            return Err(JwtError::WrongTokenType { expected, actual: claims.token_type });
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret", 900, 3600)
    }

    #[test]
    fn test_access_token_roundtrip_carries_company() {
        let jwt = service();
        let user = Uuid::new_v4();
        let token = jwt.generate_access_token(&user, Some("acme")).unwrap();

        let claims = jwt.validate_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user);
        assert_eq!(claims.company_uuid.as_deref(), Some("acme"));
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let jwt = service();
        let pair = jwt.generate_pair(&Uuid::new_v4(), None).unwrap();

        assert!(matches!(
            jwt.validate_access_token(&pair.refresh),
            Err(JwtError::WrongTokenType { .. })
        ));
        assert!(matches!(
            jwt.validate_refresh_token(&pair.access),
            Err(JwtError::WrongTokenType { .. })
        ));
        assert!(jwt.validate_refresh_token(&pair.refresh).is_ok());
    }

    #[test]
    fn test_expired_token() {
        let jwt = JwtService::new("test-secret", -3600, -3600);
        let token = jwt.generate_access_token(&Uuid::new_v4(), None).unwrap();
        assert!(matches!(jwt.validate_access_token(&token), Err(JwtError::TokenExpired)));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let token = JwtService::new("other", 900, 900)
            .generate_access_token(&Uuid::new_v4(), None)
            .unwrap();
        assert!(matches!(service().validate_token(&token), Err(JwtError::ValidationError(_))));
    }
}
