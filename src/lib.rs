//! ticket-desk - A support ticket lifecycle backend
//!
//! Tickets move through a fixed lifecycle, `NEW -> IN_PROGRESS -> RESOLVED
//! -> CLOSED`, driven by a small set of operations:
//! - create a ticket from a description
//! - assign a `NEW` ticket to an existing agent
//! - resolve an `IN_PROGRESS` ticket
//! - close a `RESOLVED` ticket that carries a resolution summary
//! - amend the description or summary of any ticket that is not closed
//! - fetch one ticket or list tickets by status, creation date and agent
//!
//! The rules live in [`service::TicketService`], which talks to its record
//! store only through the [`storage::TicketRepository`] and
//! [`storage::AgentRepository`] traits. The [`api`] module exposes the
//! service over HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ticket_desk::core::{Agent, AgentId};
//! use ticket_desk::service::{NewTicket, TicketService};
//! use ticket_desk::storage::InMemoryStore;
//!
//! let store = Arc::new(InMemoryStore::with_agents([Agent::new(42, "Agent001")]));
//! let service = TicketService::from_store(store);
//!
//! let ticket = service.create(NewTicket::with_description("Printer jammed"))?;
//! let ticket = service.assign_agent(ticket.id.unwrap(), AgentId::new(42))?;
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::match_same_arms)]

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod service;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, TicketDeskError};
