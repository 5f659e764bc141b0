// ============================================================================
// Leadboard API - Auth Handlers
// File: crates/leadboard-api/src/handlers/auth.rs
// ============================================================================
//! Token endpoints (obtain pair, refresh access)

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use leadboard_core::DomainError;
use leadboard_security::TokenPair;
use leadboard_shared::utils::non_blank;

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Token request payload
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Refresh request payload
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessResponse {
    pub access: String,
}

/// Token handler - POST /api/v1/auth/token
pub async fn obtain_token(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TokenRequest>,
) -> Result<Json<TokenPair>, ApiError> {
    let (Some(username), Some(password)) = (non_blank(payload.username), payload.password.filter(|p| !p.is_empty()))
    else {
        return Err(ApiError::BadRequest("Please provide both username and password.".to_string()));
    };

    let pair = state.services.auth.login(&username, &password).await?;
    Ok(Json(pair))
}

/// Refresh handler - POST /api/v1/auth/token/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RefreshRequest>,
) -> Result<Json<AccessResponse>, ApiError> {
    let refresh = non_blank(payload.refresh)
        .ok_or_else(|| ApiError::BadRequest("Refresh token is required.".to_string()))?;

    let access = state.services.auth.refresh(&refresh).await.map_err(|e| match e {
        DomainError::InvalidToken(_) => ApiError::Unauthorized("Invalid or expired refresh token.".to_string()),
        other => other.into(),
    })?;

    Ok(Json(AccessResponse { access }))
}
