use crate::core::{Agent, AgentId, Ticket, TicketId};
use crate::error::{Result, TicketDeskError};
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

/// Volatile record store backed by in-process maps
///
/// Ids are handed out from 1 upwards and tickets are returned in id order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    tickets: BTreeMap<TicketId, Ticket>,
    agents: BTreeMap<AgentId, Agent>,
    last_ticket_id: u64,
}

fn poisoned<T>(_: PoisonError<T>) -> TicketDeskError {
    TicketDeskError::storage("in-memory store lock poisoned")
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with agents
    #[must_use]
    pub fn with_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let store = Self::new();
        if let Ok(mut inner) = store.inner.write() {
            inner
                .agents
                .extend(agents.into_iter().map(|agent| (agent.id, agent)));
        }
        store
    }

    /// Add or replace agents
    pub fn seed_agents(&self, agents: &[Agent]) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        for agent in agents {
            inner.agents.insert(agent.id, agent.clone());
        }
        Ok(())
    }

    pub(crate) fn get_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.tickets.get(&id).cloned())
    }

    pub(crate) fn put_ticket(&self, mut ticket: Ticket) -> Result<Ticket> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let id = match ticket.id {
            Some(id) => {
                inner.last_ticket_id = inner.last_ticket_id.max(id.get());
                id
            },
            None => {
                inner.last_ticket_id += 1;
                TicketId::new(inner.last_ticket_id)
            },
        };
        ticket.id = Some(id);
        inner.tickets.insert(id, ticket.clone());
        Ok(ticket)
    }

    pub(crate) fn scan_tickets<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
    {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .tickets
            .values()
            .filter(|t| predicate(t))
            .cloned()
            .collect())
    }

    pub(crate) fn get_agent(&self, id: AgentId) -> Result<Option<Agent>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.agents.get(&id).cloned())
    }
}
