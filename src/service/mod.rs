//! Ticket lifecycle service and its query/projection types

mod filter;
mod lifecycle;
mod projection;

pub use filter::{TicketFilter, parse_date_bound, parse_statuses};
pub use lifecycle::{NewTicket, TicketService, TicketUpdate};
pub use projection::TicketView;
