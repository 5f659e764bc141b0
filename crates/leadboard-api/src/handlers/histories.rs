use axum::{extract::State, Json};
use serde::Deserialize;

use leadboard_core::{LeadHistory, ListFilter};
use leadboard_shared::{Page, PageRequest};

use super::{company_filter, uuid_filter};
use crate::error::ApiError;
use crate::extract::{ApiQuery, AuthUser};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub company_uuid: Option<String>,
    pub lead: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

/// GET /api/v1/lead-histories
pub async fn list_histories(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<Page<LeadHistory>>, ApiError> {
    let filter = ListFilter {
        company_uuid: company_filter(query.company_uuid),
        lead: uuid_filter("lead", query.lead)?,
        ..ListFilter::default()
    };
    let request = PageRequest::new(query.page, query.page_size);

    Ok(Json(state.services.histories.list(&filter, request, user.company_uuid()).await?))
}
