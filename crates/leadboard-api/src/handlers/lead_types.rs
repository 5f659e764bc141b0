//! Lead type handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use leadboard_core::commands::{CreateLeadType, UpdateLeadType};
use leadboard_core::{EntityKind, LeadType, ListFilter};

use super::{company_filter, uuid_filter};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LeadTypeQuery {
    pub company_uuid: Option<String>,
    pub board: Option<String>,
    pub status: Option<String>,
}

pub async fn list_lead_types(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<LeadTypeQuery>,
) -> Result<Json<Vec<LeadType>>, ApiError> {
    let filter = ListFilter {
        company_uuid: company_filter(query.company_uuid),
        board: uuid_filter("board", query.board)?,
        status: uuid_filter("status", query.status)?,
        ..ListFilter::default()
    };

    Ok(Json(state.services.lead_types.list(&filter, user.company_uuid()).await?))
}

pub async fn create_lead_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(cmd): ApiJson<CreateLeadType>,
) -> Result<Json<LeadType>, ApiError> {
    Ok(Json(state.services.lead_types.create(cmd, user.company_uuid()).await?))
}

pub async fn get_lead_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<LeadType>, ApiError> {
    Ok(Json(state.services.lead_types.get(&uuid, user.company_uuid()).await?))
}

pub async fn update_lead_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<UpdateLeadType>,
) -> Result<Json<LeadType>, ApiError> {
    Ok(Json(state.services.lead_types.update(&uuid, patch, user.company_uuid()).await?))
}

pub async fn delete_lead_type(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.services.lead_types.delete(&uuid, user.company_uuid()).await?;
    Ok(Json(MessageResponse::deleted(EntityKind::LeadType)))
}
