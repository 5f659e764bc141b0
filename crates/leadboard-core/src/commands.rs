// ============================================================================
// Leadboard Core - Commands
// File: crates/leadboard-core/src/commands.rs
// Description: Request shapes accepted by the services, with field constraints
// ============================================================================

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::Gender;

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let allowed = value
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')') || (c == '+' && i == 0));
    if !allowed || digits < 3 {
        return Err(ValidationError::new("phone_number").with_message("invalid phone number".into()));
    }
    Ok(())
}

fn validate_birth_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > Utc::now().date_naive() {
        return Err(ValidationError::new("birth_date").with_message("birth date is in the future".into()));
    }
    Ok(())
}

/// Reads a present field as `Some`, so an explicit `null` arrives as
/// `Some(None)` and a missing one (via `default`) as `None`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ----------------------------------------------------------------------------
// Board
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBoard {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(max = 200))]
    pub company_uuid: Option<String>,
}

/// `company_uuid: null` detaches the board from its company.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_board_patch"))]
pub struct UpdateBoard {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub company_uuid: Option<Option<String>>,
}

fn validate_board_patch(patch: &UpdateBoard) -> Result<(), ValidationError> {
    if let Some(Some(company)) = &patch.company_uuid {
        if company.chars().count() > 200 {
            return Err(ValidationError::new("company_uuid").with_message("company_uuid is too long".into()));
        }
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Status
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStatus {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,

    pub board: Uuid,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStatus {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    pub board: Option<Uuid>,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// One entry of a bulk re-sequencing request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct StatusOrder {
    pub uuid: Uuid,

    #[validate(range(min = 0))]
    pub order: i32,
}

// ----------------------------------------------------------------------------
// Lead type
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLeadType {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: String,

    pub status: Uuid,

    #[serde(default)]
    pub description: String,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateLeadType {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    pub status: Option<Uuid>,

    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

// ----------------------------------------------------------------------------
// Lead
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateLead {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub title: String,

    #[serde(rename = "type")]
    pub lead_type: Uuid,

    #[validate(length(max = 32), custom(function = "validate_phone_number"))]
    pub phone_number: Option<String>,

    pub gender: Option<Gender>,

    #[validate(custom(function = "validate_birth_date"))]
    pub birth_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(length(max = 300))]
    pub description: String,

    pub extra: Option<Map<String, Value>>,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// Partial lead update. `phone_number`, `gender` and `birth_date` set to
/// `null` are cleared; left out, they keep their value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_lead_patch"))]
pub struct UpdateLead {
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub lead_type: Option<Uuid>,

    #[serde(default, deserialize_with = "nullable")]
    pub phone_number: Option<Option<String>>,

    #[serde(default, deserialize_with = "nullable")]
    pub gender: Option<Option<Gender>>,

    #[serde(default, deserialize_with = "nullable")]
    pub birth_date: Option<Option<NaiveDate>>,

    #[validate(length(max = 300))]
    pub description: Option<String>,

    pub extra: Option<Map<String, Value>>,

    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

fn validate_lead_patch(patch: &UpdateLead) -> Result<(), ValidationError> {
    if let Some(Some(phone_number)) = &patch.phone_number {
        if phone_number.chars().count() > 32 {
            return Err(ValidationError::new("phone_number").with_message("phone number is too long".into()));
        }
        validate_phone_number(phone_number)?;
    }
    if let Some(Some(birth_date)) = &patch.birth_date {
        validate_birth_date(birth_date)?;
    }
    Ok(())
}

// ----------------------------------------------------------------------------
// Clear
// ----------------------------------------------------------------------------

/// Entities to deactivate. Only the named ones are touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearRequest {
    pub board_uuid: Option<Uuid>,
    pub status_uuid: Option<Uuid>,
    pub leadtype_uuid: Option<Uuid>,
    pub lead_uuid: Option<Uuid>,
}

impl ClearRequest {
    pub fn is_empty(&self) -> bool {
        self.board_uuid.is_none()
            && self.status_uuid.is_none()
            && self.leadtype_uuid.is_none()
            && self.lead_uuid.is_none()
    }
}
