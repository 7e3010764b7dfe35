//! Test utilities for ticket-desk
//!
//! This module provides common test fixtures and utilities to reduce
//! duplication in test code across the codebase.

#![cfg(test)]

use crate::core::{Agent, Status, Ticket, TicketBuilder, TicketId};
use crate::service::TicketService;
use crate::storage::{FileStorage, InMemoryStore, TicketRepository};
use chrono::Utc;
use std::sync::Arc;
use tempfile::TempDir;

/// Agent every fixture ticket past `New` is assigned to
pub fn test_agent() -> Agent {
    Agent::new(42, "Agent001")
}

/// Create a persisted-looking ticket in the given status
///
/// Fields are filled in consistently with the status: assigned from
/// `InProgress` on, summarised and dated when `Closed`.
pub fn create_test_ticket(id: u64, status: Status) -> Ticket {
    let mut builder = TicketBuilder::new()
        .id(TicketId::new(id))
        .description(format!("Description for ticket {id}"))
        .status(status);

    if status != Status::New {
        builder = builder.assigned_agent(test_agent());
    }
    if status == Status::Closed {
        builder = builder
            .resolution_summary("Resolved during testing")
            .closed_at(Utc::now());
    }

    builder.build()
}

/// Test fixture bundling an in-memory store and a service over it
pub struct TestDesk {
    pub store: Arc<InMemoryStore>,
    pub service: TicketService,
}

impl TestDesk {
    /// Create a desk with the standard test agent
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::with_agents([test_agent()]));
        let service = TicketService::from_store(store.clone());
        Self { store, service }
    }

    /// Create a desk whose store already holds one ticket per status
    pub fn with_sample_tickets() -> Self {
        let desk = Self::new();
        for status in Status::ALL {
            let mut ticket = create_test_ticket(0, status);
            ticket.id = None;
            desk.store.save_ticket(ticket).expect("Failed to save ticket");
        }
        desk
    }
}

/// Test fixture for a file store in a temporary directory
pub struct TestFileStore {
    pub temp_dir: TempDir,
    pub storage: FileStorage,
}

impl TestFileStore {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage =
            FileStorage::open(temp_dir.path().join("data")).expect("Failed to open storage");
        Self { temp_dir, storage }
    }
}

/// Assert the closure invariant: `closed_at` is set iff the ticket is closed
pub fn assert_closure_invariant(ticket: &Ticket) {
    assert_eq!(
        ticket.closed_at.is_some(),
        ticket.status == Status::Closed,
        "closed_at must be set exactly when the ticket is CLOSED: {ticket:?}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::TicketFilter;

    #[test]
    fn test_fixture_tickets_are_consistent() {
        for status in Status::ALL {
            let ticket = create_test_ticket(1, status);
            assert_closure_invariant(&ticket);
            assert_eq!(ticket.assigned_agent.is_some(), status != Status::New);
        }
    }

    #[test]
    fn test_desk_with_sample_tickets() {
        let desk = TestDesk::with_sample_tickets();
        let tickets = desk.service.list(&TicketFilter::new()).unwrap();
        assert_eq!(tickets.len(), 4);
    }

    #[test]
    fn test_file_store_fixture() {
        let fixture = TestFileStore::new();
        assert!(fixture.storage.root().starts_with(fixture.temp_dir.path()));
    }
}
