//! Listing filters

use uuid::Uuid;

/// Optional narrowing applied on top of the active-only rule. Each repository
/// honours the dimensions that make sense for its entity and ignores the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub company_uuid: Option<String>,
    pub board: Option<Uuid>,
    pub status: Option<Uuid>,
    pub lead_type: Option<Uuid>,
    pub lead: Option<Uuid>,
}

impl ListFilter {
    pub fn for_board(board: Uuid) -> Self {
        Self { board: Some(board), ..Self::default() }
    }

    pub fn for_lead(lead: Uuid) -> Self {
        Self { lead: Some(lead), ..Self::default() }
    }

    /// Narrows to the caller's company. `None` when the request names another
    /// company, which the caller cannot see. A caller without a company is not narrowed.
    pub fn within_company(mut self, caller_company: Option<&str>) -> Option<Self> {
        let Some(own) = caller_company else {
            return Some(self);
        };
        if self.company_uuid.is_none() {
            self.company_uuid = Some(own.to_string());
        }
        (self.company_uuid.as_deref() == Some(own)).then_some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_company_defaults_to_caller() {
        let filter = ListFilter::default().within_company(Some("acme")).unwrap();
        assert_eq!(filter.company_uuid.as_deref(), Some("acme"));
    }

    #[test]
    fn test_within_company_rejects_other_company() {
        let filter = ListFilter { company_uuid: Some("globex".to_string()), ..ListFilter::default() };
        assert_eq!(filter.clone().within_company(Some("acme")), None);
        assert_eq!(filter.clone().within_company(Some("globex")), Some(filter.clone()));
        assert_eq!(filter.clone().within_company(None), Some(filter));
    }
}
