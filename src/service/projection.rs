//! External representation of tickets

use crate::core::{Status, Ticket, TicketId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ticket as exposed to API clients
///
/// Fields mirror [`Ticket`] one to one, except that the assigned agent is
/// reduced to its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: Option<TicketId>,
    pub description: Option<String>,
    pub status: Status,
    #[serde(rename = "createdDate")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "closedDate")]
    pub closed_at: Option<DateTime<Utc>>,
    pub assigned_agent: Option<String>,
    pub resolution_summary: Option<String>,
}

impl From<&Ticket> for TicketView {
    fn from(ticket: &Ticket) -> Self {
        Self {
            id: ticket.id,
            description: ticket.description.clone(),
            status: ticket.status,
            created_at: ticket.created_at,
            closed_at: ticket.closed_at,
            assigned_agent: ticket.agent_name().map(str::to_string),
            resolution_summary: ticket.resolution_summary.clone(),
        }
    }
}

impl From<Ticket> for TicketView {
    fn from(ticket: Ticket) -> Self {
        let assigned_agent = ticket.assigned_agent.map(|agent| agent.name);
        Self {
            id: ticket.id,
            description: ticket.description,
            status: ticket.status,
            created_at: ticket.created_at,
            closed_at: ticket.closed_at,
            assigned_agent,
            resolution_summary: ticket.resolution_summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Agent, TicketBuilder};

    #[test]
    fn test_agent_is_projected_to_name() {
        let ticket = TicketBuilder::new()
            .id(TicketId::new(3))
            .description("Printer broken")
            .status(Status::InProgress)
            .assigned_agent(Agent::new(42, "Agent001"))
            .build();

        let view = TicketView::from(&ticket);
        assert_eq!(view.id, Some(TicketId::new(3)));
        assert_eq!(view.assigned_agent.as_deref(), Some("Agent001"));
        assert_eq!(view, TicketView::from(ticket));
    }

    #[test]
    fn test_wire_field_names() {
        let ticket = TicketBuilder::new()
            .id(TicketId::new(1))
            .description("Printer broken")
            .build();

        let json = serde_json::to_value(TicketView::from(ticket)).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], "NEW");
        assert!(json["createdDate"].is_string());
        assert!(json["closedDate"].is_null());
        assert!(json["assignedAgent"].is_null());
        assert!(json["resolutionSummary"].is_null());
    }
}
