// ============================================================================
// Leadboard Core - Lead Entity
// File: crates/leadboard-core/src/domain/lead.rs
// Description: Tracked record belonging to a lead type
// ============================================================================

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::LeadType;
use crate::error::DomainError;

/// Gender enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(DomainError::ValidationError(format!("unknown gender: {}", other))),
        }
    }
}

/// Lead entity. `type_name` is read-only, resolved from the lead type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub uuid: Uuid,
    #[serde(rename = "type")]
    pub lead_type: Uuid,
    pub type_name: String,
    pub title: String,
    pub phone_number: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub description: String,
    pub extra: Map<String, Value>,
    pub order: i32,

    #[serde(skip_serializing)]
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    pub fn new(lead_type: &LeadType, title: String) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            lead_type: lead_type.uuid,
            type_name: lead_type.name.clone(),
            title: title.trim().to_string(),
            phone_number: None,
            gender: None,
            birth_date: None,
            description: String::new(),
            extra: Map::new(),
            order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn move_to(&mut self, lead_type: &LeadType) {
        self.lead_type = lead_type.uuid;
        self.type_name = lead_type.name.clone();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_roundtrip() {
        for gender in [Gender::Male, Gender::Female] {
            assert_eq!(gender.as_str().parse::<Gender>().unwrap(), gender);
        }
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_lead_serializes_type_field() {
        let status = crate::domain::Status::new(
            &crate::domain::Board::new("Sales".to_string(), None),
            "New".to_string(),
            1,
        );
        let lead_type = LeadType::new(&status, "Inbound".to_string(), String::new(), 1);
        let lead = Lead::new(&lead_type, "ACME deal".to_string());

        let json = serde_json::to_value(&lead).unwrap();
        assert_eq!(json["type"], serde_json::json!(lead_type.uuid));
        assert_eq!(json["type_name"], "Inbound");
        assert_eq!(json["extra"], serde_json::json!({}));
        assert_eq!(json["order"], 0);
    }
}
