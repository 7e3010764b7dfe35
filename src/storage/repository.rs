use crate::core::{Agent, AgentId, Ticket, TicketId};
use crate::error::Result;
use crate::service::TicketFilter;

/// Repository trait for ticket storage operations
///
/// The store owns identity and durability: it assigns ids on first save
/// and decides the order in which filtered tickets come back.
#[cfg_attr(test, mockall::automock)]
pub trait TicketRepository: Send + Sync {
    /// Finds a ticket by ID
    fn find_ticket_by_id(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Saves a ticket, assigning an ID if it has none, and returns the stored copy
    fn save_ticket(&self, ticket: Ticket) -> Result<Ticket>;

    /// Finds tickets matching a filter, in store-defined order
    fn find_tickets_by_filter(&self, filter: &TicketFilter) -> Result<Vec<Ticket>>;
}

/// Repository trait for agent lookups
#[cfg_attr(test, mockall::automock)]
pub trait AgentRepository: Send + Sync {
    /// Finds an agent by ID
    fn find_agent_by_id(&self, id: AgentId) -> Result<Option<Agent>>;
}

/// Combined repository trait
pub trait RecordStore: TicketRepository + AgentRepository {}

/// Implementation of `RecordStore` for types that implement both traits
impl<T> RecordStore for T where T: TicketRepository + AgentRepository {}

use super::file::FileStorage;
use super::memory::InMemoryStore;

impl TicketRepository for FileStorage {
    fn find_ticket_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        self.load_ticket(id)
    }

    fn save_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        self.store_ticket(ticket)
    }

    fn find_tickets_by_filter(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.into_iter().filter(|t| filter.matches(t)).collect())
    }
}

impl AgentRepository for FileStorage {
    fn find_agent_by_id(&self, id: AgentId) -> Result<Option<Agent>> {
        let agents = self.load_agents()?;
        Ok(agents.into_iter().find(|agent| agent.id == id))
    }
}

impl TicketRepository for InMemoryStore {
    fn find_ticket_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        self.get_ticket(id)
    }

    fn save_ticket(&self, ticket: Ticket) -> Result<Ticket> {
        self.put_ticket(ticket)
    }

    fn find_tickets_by_filter(&self, filter: &TicketFilter) -> Result<Vec<Ticket>> {
        self.scan_tickets(|t| filter.matches(t))
    }
}

impl AgentRepository for InMemoryStore {
    fn find_agent_by_id(&self, id: AgentId) -> Result<Option<Agent>> {
        self.get_agent(id)
    }
}
