//! Lead handlers. Changing `type` through PATCH records a history row.

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use leadboard_core::commands::{CreateLead, UpdateLead};
use leadboard_core::{EntityKind, Lead, ListFilter};
use leadboard_shared::{Page, PageRequest};

use super::{company_filter, uuid_filter};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LeadQuery {
    pub company_uuid: Option<String>,
    pub board: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub lead_type: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

pub async fn list_leads(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<LeadQuery>,
) -> Result<Json<Page<Lead>>, ApiError> {
    let filter = ListFilter {
        company_uuid: company_filter(query.company_uuid),
        board: uuid_filter("board", query.board)?,
        status: uuid_filter("status", query.status)?,
        lead_type: uuid_filter("type", query.lead_type)?,
        ..ListFilter::default()
    };
    let request = PageRequest::new(query.page, query.page_size);

    Ok(Json(state.services.leads.list(&filter, request, user.company_uuid()).await?))
}

pub async fn create_lead(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(cmd): ApiJson<CreateLead>,
) -> Result<Json<Lead>, ApiError> {
    Ok(Json(state.services.leads.create(cmd, user.company_uuid()).await?))
}

pub async fn get_lead(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<Lead>, ApiError> {
    Ok(Json(state.services.leads.get(&uuid, user.company_uuid()).await?))
}

pub async fn update_lead(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<UpdateLead>,
) -> Result<Json<Lead>, ApiError> {
    Ok(Json(state.services.leads.update(&uuid, patch, user.company_uuid()).await?))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.services.leads.delete(&uuid, user.company_uuid()).await?;
    Ok(Json(MessageResponse::deleted(EntityKind::Lead)))
}
