//! HTTP handlers

pub mod auth;
pub mod boards;
pub mod clear;
pub mod health;
pub mod histories;
pub mod lead_types;
pub mod leads;
pub mod statuses;

use uuid::Uuid;

use leadboard_shared::utils::{non_blank, parse_optional_uuid};

use crate::error::ApiError;

/// Parses an optional UUID query filter; a malformed value is a bad request.
pub(crate) fn uuid_filter(field: &str, value: Option<String>) -> Result<Option<Uuid>, ApiError> {
    parse_optional_uuid(field, value).map_err(ApiError::BadRequest)
}

pub(crate) fn company_filter(value: Option<String>) -> Option<String> {
    non_blank(value)
}
