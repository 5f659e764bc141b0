//! Board handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use leadboard_core::commands::{CreateBoard, UpdateBoard};
use leadboard_core::{Board, BoardOverview, EntityKind, ListFilter};

use super::company_filter;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::response::MessageResponse;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub company_uuid: Option<String>,
}

pub async fn list_boards(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<BoardQuery>,
) -> Result<Json<Vec<Board>>, ApiError> {
    let filter = ListFilter {
        company_uuid: company_filter(query.company_uuid),
        ..ListFilter::default()
    };

    Ok(Json(state.services.boards.list(&filter, user.company_uuid()).await?))
}

pub async fn create_board(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(cmd): ApiJson<CreateBoard>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.services.boards.create(cmd, user.company_uuid()).await?))
}

pub async fn get_board(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.services.boards.get(&uuid, user.company_uuid()).await?))
}

pub async fn update_board(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<UpdateBoard>,
) -> Result<Json<Board>, ApiError> {
    Ok(Json(state.services.boards.update(&uuid, patch, user.company_uuid()).await?))
}

pub async fn delete_board(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.services.boards.delete(&uuid, user.company_uuid()).await?;
    Ok(Json(MessageResponse::deleted(EntityKind::Board)))
}

/// GET /api/v1/boards/{uuid}/overview
pub async fn board_overview(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(uuid): ApiPath<Uuid>,
) -> Result<Json<BoardOverview>, ApiError> {
    Ok(Json(state.services.boards.overview(&uuid, user.company_uuid()).await?))
}
