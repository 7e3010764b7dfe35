//! Record stores for tickets and agents

mod file;
mod memory;
mod repository;

pub use file::{FileStorage, StorageState};
pub use memory::InMemoryStore;
pub use repository::{AgentRepository, RecordStore, TicketRepository};

#[cfg(test)]
pub use repository::{MockAgentRepository, MockTicketRepository};
