//! Ticket domain model
//!
//! Tickets, agents and the lifecycle rules that govern how a ticket moves
//! between statuses.

mod agent;
mod builders;
mod status;
mod ticket;

pub use agent::{Agent, AgentId};
pub use builders::TicketBuilder;
pub use status::{StateViolation, Status, Transition};
pub use ticket::{Ticket, TicketId};
