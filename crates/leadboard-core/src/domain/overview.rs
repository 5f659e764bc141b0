//! Nested kanban view of a board

use serde::Serialize;

use super::{Board, Lead, LeadType, Status};

#[derive(Debug, Clone, Serialize)]
pub struct BoardOverview {
    pub board: Board,
    pub statuses: Vec<StatusColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusColumn {
    #[serde(flatten)]
    pub status: Status,
    pub lead_types: Vec<LeadTypeColumn>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadTypeColumn {
    #[serde(flatten)]
    pub lead_type: LeadType,
    pub leads: Vec<Lead>,
}

impl BoardOverview {
    /// Groups already ordered, active children under their parents. Children whose
    /// parent is not in the given lists are dropped.
    pub fn assemble(board: Board, statuses: Vec<Status>, lead_types: Vec<LeadType>, leads: Vec<Lead>) -> Self {
        let statuses = statuses
            .into_iter()
            .map(|status| {
                let lead_types = lead_types
                    .iter()
                    .filter(|lt| lt.status == status.uuid)
                    .map(|lt| LeadTypeColumn {
                        lead_type: lt.clone(),
                        leads: leads.iter().filter(|l| l.lead_type == lt.uuid).cloned().collect(),
                    })
                    .collect();
                StatusColumn { status, lead_types }
            })
            .collect();

        Self { board, statuses }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_groups_children() {
        let board = Board::new("Sales".to_string(), None);
        let new = Status::new(&board, "New".to_string(), 1);
        let won = Status::new(&board, "Won".to_string(), 2);
        let inbound = LeadType::new(&new, "Inbound".to_string(), String::new(), 1);
        let referral = LeadType::new(&won, "Referral".to_string(), String::new(), 1);
        let a = Lead::new(&inbound, "A".to_string());
        let b = Lead::new(&referral, "B".to_string());
        let c = Lead::new(&inbound, "C".to_string());

        let overview = BoardOverview::assemble(
            board,
            vec![new.clone(), won.clone()],
            vec![inbound.clone(), referral.clone()],
            vec![a.clone(), b.clone(), c.clone()],
        );

        assert_eq!(overview.statuses.len(), 2);
        assert_eq!(overview.statuses[0].status.uuid, new.uuid);
        let inbound_leads: Vec<_> = overview.statuses[0].lead_types[0].leads.iter().map(|l| l.uuid).collect();
        assert_eq!(inbound_leads, vec![a.uuid, c.uuid]);
        assert_eq!(overview.statuses[1].lead_types[0].leads[0].uuid, b.uuid);
    }
}
