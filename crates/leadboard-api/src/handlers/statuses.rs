//! Status handlers, including bulk ordering

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use leadboard_core::commands::{CreateStatus, StatusOrder, UpdateStatus};
use leadboard_core::{EntityKind, ListFilter, Status};

use super::{company_filter, uuid_filter};
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct StatusQuery {
    pub company_uuid: Option<String>,
    pub board: Option<String>,
}

pub async fn list_statuses(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<StatusQuery>,
) -> Result<Json<Vec<Status>>, ApiError> {
    let filter = ListFilter {
        company_uuid: company_filter(query.company_uuid),
        board: uuid_filter("board", query.board)?,
        ..ListFilter::default()
    };

    Ok(Json(state.services.statuses.list(&filter, user.company_uuid()).await?))
}

pub async fn create_status(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(cmd): ApiJson<CreateStatus>,
) -> Result<Json<Status>, ApiError> {
    Ok(Json(state.services.statuses.create(cmd, user.company_uuid()).await?))
}

pub async fn get_status(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<Status>, ApiError> {
    Ok(Json(state.services.statuses.get(&uuid, user.company_uuid()).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<UpdateStatus>,
) -> Result<Json<Status>, ApiError> {
    Ok(Json(state.services.statuses.update(&uuid, patch, user.company_uuid()).await?))
}

pub async fn delete_status(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.services.statuses.delete(&uuid, user.company_uuid()).await?;
    Ok(Json(MessageResponse::deleted(EntityKind::Status)))
}

/// PATCH /api/v1/statuses/order
pub async fn reorder_statuses(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(orders): ApiJson<Vec<StatusOrder>>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.services.statuses.reorder(orders, user.company_uuid()).await?;
    Ok(Json(MessageResponse::new("Status order updated successfully")))
}
