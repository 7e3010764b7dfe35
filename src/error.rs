//! Error types for ticket-desk
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! type separates request-scoped validation failures (which carry a fixed,
//! user-facing message) from infrastructure failures of the record store
//! or configuration layer.

use crate::core::{AgentId, StateViolation, TicketId};
use thiserror::Error;

/// Result type alias for ticket-desk operations
pub type Result<T> = std::result::Result<T, TicketDeskError>;

/// Main error type for ticket-desk
#[derive(Error, Debug)]
pub enum TicketDeskError {
    /// A ticket was created without a description
    #[error("Description is required.")]
    MissingDescription,

    /// A ticket was closed before a resolution summary was recorded
    #[error("Resolution summary is required to close a ticket.")]
    MissingResolutionSummary,

    /// The requested transition is not legal from the ticket's status
    #[error("{0}")]
    InvalidState(#[from] StateViolation),

    /// No ticket exists with the given id
    #[error("Ticket not found.")]
    TicketNotFound { id: TicketId },

    /// No agent exists with the given id
    #[error("Agent not found.")]
    AgentNotFound { id: AgentId },

    /// A list filter whose start date lies after its end date
    #[error("Start date must not be after end date.")]
    InvalidDateRange,

    /// A query parameter could not be parsed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The record store failed
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl TicketDeskError {
    /// Create a storage error from any displayable cause
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Whether the error was caused by the request rather than the system
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingDescription
                | Self::MissingResolutionSummary
                | Self::InvalidState(_)
                | Self::TicketNotFound { .. }
                | Self::AgentNotFound { .. }
                | Self::InvalidDateRange
                | Self::InvalidQuery(_)
        )
    }

    /// Whether the error comes from loading or validating configuration
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Message safe to show to an API client or terminal user
    ///
    /// Client errors expose their fixed message; internal failures are
    /// collapsed into a generic message so store details do not leak.
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.is_client_error() || self.is_config_error() {
            self.to_string()
        } else {
            "An internal error occurred.".to_string()
        }
    }
}
