//! Ticket lifecycle service
//!
//! The service is the only writer of ticket state. Each operation reads at
//! most one ticket and one agent, applies the lifecycle rules and performs
//! at most one save; when any rule fails nothing is persisted.

use super::{TicketFilter, TicketView};
use crate::core::{AgentId, Status, Ticket, TicketId, Transition};
use crate::error::{Result, TicketDeskError};
use crate::storage::{AgentRepository, RecordStore, TicketRepository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Input for creating a ticket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub description: Option<String>,
    /// Accepted for compatibility and ignored: tickets always start as `NEW`.
    /// Values that are not a known status deserialize as `None`.
    #[serde(default, deserialize_with = "ignore_unknown_status")]
    pub status: Option<Status>,
}

fn ignore_unknown_status<'de, D>(deserializer: D) -> std::result::Result<Option<Status>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Supplied {
        Known(Status),
        Unknown(serde::de::IgnoredAny),
    }

    Ok(match Option::<Supplied>::deserialize(deserializer)? {
        Some(Supplied::Known(status)) => Some(status),
        Some(Supplied::Unknown(_)) | None => None,
    })
}

impl NewTicket {
    #[must_use]
    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            status: None,
        }
    }
}

/// Replacement values for the editable fields of a ticket
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub description: Option<String>,
    pub resolution_summary: Option<String>,
}

/// Enforces the ticket lifecycle on top of a record store
#[derive(Clone)]
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    agents: Arc<dyn AgentRepository>,
}

impl std::fmt::Debug for TicketService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketService")
            .field("tickets", &"Arc<dyn TicketRepository>")
            .field("agents", &"Arc<dyn AgentRepository>")
            .finish()
    }
}

impl TicketService {
    /// Create a service over separate ticket and agent repositories
    pub fn new(tickets: Arc<dyn TicketRepository>, agents: Arc<dyn AgentRepository>) -> Self {
        Self { tickets, agents }
    }

    /// Create a service over a store that holds both record kinds
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: RecordStore + 'static,
    {
        Self {
            tickets: store.clone(),
            agents: store,
        }
    }

    /// Create a ticket in the `NEW` status
    #[instrument(skip_all)]
    pub fn create(&self, request: NewTicket) -> Result<TicketView> {
        if let Some(status) = request.status.filter(|s| *s != Status::New) {
            debug!(%status, "Ignoring caller-supplied status on create");
        }

        let ticket = Ticket::open(request.description, Utc::now())?;
        let saved = self.tickets.save_ticket(ticket)?;

        info!(ticket_id = ?saved.id, "Ticket created");
        Ok(saved.into())
    }

    /// Assign a `NEW` ticket to an agent, moving it to `IN_PROGRESS`
    #[instrument(skip(self), fields(%ticket_id, %agent_id))]
    pub fn assign_agent(&self, ticket_id: TicketId, agent_id: AgentId) -> Result<TicketView> {
        let mut ticket = self.load(ticket_id)?;

        if let Err(violation) = Transition::Assign.check(ticket.status) {
            warn!(status = %ticket.status, "Rejected assignment");
            return Err(violation.into());
        }

        let agent = self
            .agents
            .find_agent_by_id(agent_id)?
            .ok_or(TicketDeskError::AgentNotFound { id: agent_id })?;

        ticket.assign_to(agent)?;
        let saved = self.tickets.save_ticket(ticket)?;

        info!("Ticket assigned");
        Ok(saved.into())
    }

    /// Move an `IN_PROGRESS` ticket to `RESOLVED`
    #[instrument(skip(self), fields(%ticket_id))]
    pub fn resolve(&self, ticket_id: TicketId) -> Result<TicketView> {
        let mut ticket = self.load(ticket_id)?;

        ticket.resolve().inspect_err(|_| {
            warn!(status = %ticket.status, "Rejected resolution");
        })?;
        let saved = self.tickets.save_ticket(ticket)?;

        info!("Ticket resolved");
        Ok(saved.into())
    }

    /// Move a `RESOLVED` ticket with a resolution summary to `CLOSED`
    #[instrument(skip(self), fields(%ticket_id))]
    pub fn close(&self, ticket_id: TicketId) -> Result<TicketView> {
        let mut ticket = self.load(ticket_id)?;

        let status = ticket.status;
        ticket.close(Utc::now()).inspect_err(|err| {
            warn!(%status, error = %err, "Rejected closure");
        })?;
        let saved = self.tickets.save_ticket(ticket)?;

        info!("Ticket closed");
        Ok(saved.into())
    }

    /// Overwrite description and resolution summary of a ticket that is not `CLOSED`
    #[instrument(skip(self, update), fields(%ticket_id))]
    pub fn update(&self, ticket_id: TicketId, update: TicketUpdate) -> Result<TicketView> {
        let mut ticket = self.load(ticket_id)?;

        ticket.amend(update.description, update.resolution_summary)?;
        let saved = self.tickets.save_ticket(ticket)?;

        info!("Ticket updated");
        Ok(saved.into())
    }

    /// Fetch a single ticket
    #[instrument(skip(self), fields(%ticket_id))]
    pub fn get_by_id(&self, ticket_id: TicketId) -> Result<TicketView> {
        self.load(ticket_id).map(TicketView::from)
    }

    /// List tickets matching a filter, in the order the store returns them
    #[instrument(skip(self))]
    pub fn list(&self, filter: &TicketFilter) -> Result<Vec<TicketView>> {
        filter.validate()?;

        let tickets = self.tickets.find_tickets_by_filter(filter)?;
        debug!(count = tickets.len(), "Listed tickets");
        Ok(tickets.into_iter().map(TicketView::from).collect())
    }

    fn load(&self, ticket_id: TicketId) -> Result<Ticket> {
        self.tickets
            .find_ticket_by_id(ticket_id)?
            .ok_or(TicketDeskError::TicketNotFound { id: ticket_id })
    }
}
