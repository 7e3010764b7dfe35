use crate::error::{Result, TicketDeskError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a ticket
///
/// Statuses are ordered: a ticket only ever moves one step forward
/// through `New -> InProgress -> Resolved -> Closed`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    New,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    /// All statuses in lifecycle order
    pub const ALL: [Self; 4] = [Self::New, Self::InProgress, Self::Resolved, Self::Closed];

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// The only status reachable from this one, if any
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::New => Some(Self::InProgress),
            Self::InProgress => Some(Self::Resolved),
            Self::Resolved => Some(Self::Closed),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Whether moving from `self` to `target` is a legal lifecycle edge
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TicketDeskError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                TicketDeskError::InvalidQuery(format!(
                    "unknown status '{s}'. Must be one of: NEW, IN_PROGRESS, RESOLVED, CLOSED"
                ))
            })
    }
}

/// A lifecycle transition a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Assign,
    Resolve,
    Close,
}

impl Transition {
    /// Status a ticket must be in for the transition to apply
    #[must_use]
    pub const fn source(self) -> Status {
        match self {
            Self::Assign => Status::New,
            Self::Resolve => Status::InProgress,
            Self::Close => Status::Resolved,
        }
    }

    /// Status the ticket ends up in
    #[must_use]
    pub const fn target(self) -> Status {
        match self {
            Self::Assign => Status::InProgress,
            Self::Resolve => Status::Resolved,
            Self::Close => Status::Closed,
        }
    }

    const fn violation(self) -> StateViolation {
        match self {
            Self::Assign => StateViolation::AssignRequiresNew,
            Self::Resolve => StateViolation::ResolveRequiresInProgress,
            Self::Close => StateViolation::CloseRequiresResolved,
        }
    }

    /// Check that a ticket in `current` may take this transition
    pub fn check(self, current: Status) -> std::result::Result<Status, StateViolation> {
        if current == self.source() {
            Ok(self.target())
        } else {
            Err(self.violation())
        }
    }
}

/// Reason a requested state change was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateViolation {
    #[error("Only NEW ticket can be assigned to an agent.")]
    AssignRequiresNew,

    #[error("Only ticket IN PROGRESS can be resolved.")]
    ResolveRequiresInProgress,

    #[error("Only RESOLVED ticket can be closed.")]
    CloseRequiresResolved,

    #[error("CLOSED tickets cannot be updated.")]
    UpdateOfClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_is_strictly_forward() {
        assert!(Status::New.can_transition_to(Status::InProgress));
        assert!(Status::InProgress.can_transition_to(Status::Resolved));
        assert!(Status::Resolved.can_transition_to(Status::Closed));

        assert!(!Status::New.can_transition_to(Status::Resolved));
        assert!(!Status::Resolved.can_transition_to(Status::InProgress));
        assert!(!Status::New.can_transition_to(Status::New));
        for status in Status::ALL {
            assert!(!Status::Closed.can_transition_to(status));
        }
    }

    #[test]
    fn test_transition_edges_match_status_order() {
        for transition in [Transition::Assign, Transition::Resolve, Transition::Close] {
            assert!(transition.source().can_transition_to(transition.target()));
        }
    }

    #[test]
    fn test_transition_check() {
        assert_eq!(Transition::Assign.check(Status::New), Ok(Status::InProgress));
        assert_eq!(
            Transition::Assign.check(Status::Resolved),
            Err(StateViolation::AssignRequiresNew)
        );
        assert_eq!(
            Transition::Resolve.check(Status::New),
            Err(StateViolation::ResolveRequiresInProgress)
        );
        assert_eq!(
            Transition::Close.check(Status::Closed),
            Err(StateViolation::CloseRequiresResolved)
        );
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("NEW".parse::<Status>().unwrap(), Status::New);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!(" resolved ".parse::<Status>().unwrap(), Status::Resolved);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: Status = serde_json::from_str("\"CLOSED\"").unwrap();
        assert_eq!(parsed, Status::Closed);
    }
}
