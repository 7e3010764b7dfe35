use super::{Agent, StateViolation, Status, Transition};
use crate::error::{Result, TicketDeskError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a ticket, assigned by the record store on first save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(u64);

impl TicketId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unit of support work tracked through the ticket lifecycle
///
/// The mutating methods are the only way the lifecycle service changes a
/// ticket, and each of them re-checks the lifecycle rules so a ticket can
/// never reach an inconsistent state:
///
/// - `closed_at` is set exactly when the status is `Closed`
/// - `assigned_agent` is only set once the ticket left `New`
/// - a ticket only closes with a non-empty resolution summary
/// - `created_at` never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// `None` until the record store has persisted the ticket
    pub id: Option<TicketId>,
    pub description: Option<String>,
    pub status: Status,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub assigned_agent: Option<Agent>,
    pub resolution_summary: Option<String>,
}

impl Ticket {
    /// Open a new ticket in the `New` status
    ///
    /// Fails with `MissingDescription` when the description is absent or empty.
    pub fn open(description: Option<String>, created_at: DateTime<Utc>) -> Result<Self> {
        let description = description
            .filter(|d| !d.is_empty())
            .ok_or(TicketDeskError::MissingDescription)?;

        Ok(Self {
            id: None,
            description: Some(description),
            status: Status::New,
            created_at,
            closed_at: None,
            assigned_agent: None,
            resolution_summary: None,
        })
    }

    /// Whether a non-empty resolution summary is recorded
    #[must_use]
    pub fn has_resolution_summary(&self) -> bool {
        self.resolution_summary
            .as_deref()
            .is_some_and(|summary| !summary.is_empty())
    }

    /// Name of the assigned agent, if any
    #[must_use]
    pub fn agent_name(&self) -> Option<&str> {
        self.assigned_agent.as_ref().map(|agent| agent.name.as_str())
    }

    /// Move a `New` ticket to `InProgress` under the given agent
    pub fn assign_to(&mut self, agent: Agent) -> Result<()> {
        self.status = Transition::Assign.check(self.status)?;
        self.assigned_agent = Some(agent);
        Ok(())
    }

    /// Move an `InProgress` ticket to `Resolved`
    pub fn resolve(&mut self) -> Result<()> {
        self.status = Transition::Resolve.check(self.status)?;
        Ok(())
    }

    /// Move a `Resolved` ticket to `Closed`
    ///
    /// The resolution summary is checked before the status, so a ticket
    /// without a summary reports `MissingResolutionSummary` whatever its
    /// status.
    pub fn close(&mut self, closed_at: DateTime<Utc>) -> Result<()> {
        if !self.has_resolution_summary() {
            return Err(TicketDeskError::MissingResolutionSummary);
        }
        self.status = Transition::Close.check(self.status)?;
        self.closed_at = Some(closed_at);
        Ok(())
    }

    /// Overwrite the editable fields of a ticket that is not closed
    ///
    /// Both fields are replaced as given, absent or empty values included.
    pub fn amend(
        &mut self,
        description: Option<String>,
        resolution_summary: Option<String>,
    ) -> Result<()> {
        if self.status.is_closed() {
            return Err(StateViolation::UpdateOfClosed.into());
        }
        self.description = description;
        self.resolution_summary = resolution_summary;
        Ok(())
    }
}
