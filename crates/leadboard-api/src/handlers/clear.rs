//! Caller-driven cascade: DELETE /api/v1/clear

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use leadboard_core::commands::ClearRequest;
use leadboard_core::services::ClearOutcome;

use super::uuid_filter;
use crate::error::ApiError;
use crate::extract::{ApiQuery, AuthUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ClearQuery {
    pub board_uuid: Option<String>,
    pub status_uuid: Option<String>,
    pub leadtype_uuid: Option<String>,
    pub lead_uuid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: String,
    pub cleared: ClearOutcome,
}

impl TryFrom<ClearQuery> for ClearRequest {
    type Error = ApiError;

    fn try_from(query: ClearQuery) -> Result<Self, Self::Error> {
        Ok(ClearRequest {
            board_uuid: uuid_filter("board_uuid", query.board_uuid)?,
            status_uuid: uuid_filter("status_uuid", query.status_uuid)?,
            leadtype_uuid: uuid_filter("leadtype_uuid", query.leadtype_uuid)?,
            lead_uuid: uuid_filter("lead_uuid", query.lead_uuid)?,
        })
    }
}

pub async fn clear(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ClearQuery>,
) -> Result<Json<ClearResponse>, ApiError> {
    let cleared = state.services.clear.clear(query.try_into()?, user.company_uuid()).await?;
    Ok(Json(ClearResponse {
        message: "Cleared successfully".to_string(),
        cleared,
    }))
}
