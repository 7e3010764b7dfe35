use super::{Agent, Status, Ticket, TicketId};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Unlike [`Ticket::open`], the builder performs no validation: it is the
/// way to materialise a ticket in an arbitrary persisted state, e.g. when a
/// store rehydrates records or a test needs a `Resolved` ticket.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    description: Option<String>,
    status: Option<Status>,
    created_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    assigned_agent: Option<Agent>,
    resolution_summary: Option<String>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub const fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `closed_at` timestamp
    #[must_use]
    pub const fn closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.closed_at = Some(closed_at);
        self
    }

    /// Set the assigned agent
    #[must_use]
    pub fn assigned_agent(mut self, agent: Agent) -> Self {
        self.assigned_agent = Some(agent);
        self
    }

    /// Set the resolution summary
    #[must_use]
    pub fn resolution_summary(mut self, summary: impl Into<String>) -> Self {
        self.resolution_summary = Some(summary.into());
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        Ticket {
            id: self.id,
            description: self.description,
            status: self.status.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
            closed_at: self.closed_at,
            assigned_agent: self.assigned_agent,
            resolution_summary: self.resolution_summary,
        }
    }
}
