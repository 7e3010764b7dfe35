//! Ticket list filtering
//!
//! A [`TicketFilter`] is validated by the lifecycle service and then handed
//! to the record store, which decides how to evaluate it. [`TicketFilter::matches`]
//! is the reference predicate the bundled stores use.

use crate::core::{Status, Ticket};
use crate::error::{Result, TicketDeskError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Criteria for listing tickets
///
/// Every criterion is optional; an empty filter matches every ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    /// Accepted statuses; empty means any status
    pub statuses: Vec<Status>,
    /// Inclusive lower bound on the creation timestamp
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the creation timestamp
    pub end_date: Option<DateTime<Utc>>,
    /// Exact name of the assigned agent
    pub assigned_agent: Option<String>,
}

impl TicketFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    #[must_use]
    pub const fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    #[must_use]
    pub fn with_assigned_agent(mut self, name: impl Into<String>) -> Self {
        self.assigned_agent = Some(name.into());
        self
    }

    /// Reject a date range whose start lies after its end
    pub fn validate(&self) -> Result<()> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(TicketDeskError::InvalidDateRange),
            _ => Ok(()),
        }
    }

    /// Check if a ticket matches all filter criteria
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&ticket.status) {
            return false;
        }

        if self.start_date.is_some_and(|start| ticket.created_at < start) {
            return false;
        }

        if self.end_date.is_some_and(|end| ticket.created_at > end) {
            return false;
        }

        if let Some(ref name) = self.assigned_agent {
            if ticket.agent_name() != Some(name.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Parse a date bound given as a query parameter
///
/// Accepts RFC 3339 (`2024-01-15T10:00:00Z`), a timestamp without offset
/// (`2024-01-15T10:00:00`, read as UTC) or a plain date (`2024-01-15`,
/// midnight UTC).
pub fn parse_date_bound(value: &str) -> Result<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(TicketDeskError::InvalidQuery(format!(
        "invalid date '{value}'. Use formats like '2024-01-15', '2024-01-15T10:00:00' or '2024-01-15T10:00:00Z'"
    )))
}

/// Parse a comma-separated list of statuses, e.g. `NEW,IN_PROGRESS`
pub fn parse_statuses(value: &str) -> Result<Vec<Status>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Agent, TicketBuilder};
    use chrono::{Duration, TimeZone};

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_validate_date_range() {
        let inverted = TicketFilter::new()
            .with_start_date(at(2023, 6, 25))
            .with_end_date(at(1999, 6, 25));
        assert!(matches!(
            inverted.validate(),
            Err(TicketDeskError::InvalidDateRange)
        ));

        let inverted_with_more = inverted
            .with_statuses([Status::New])
            .with_assigned_agent("Agent001");
        assert!(inverted_with_more.validate().is_err());

        let same_instant = TicketFilter::new()
            .with_start_date(at(2024, 1, 1))
            .with_end_date(at(2024, 1, 1));
        assert!(same_instant.validate().is_ok());

        assert!(TicketFilter::new().with_end_date(at(1999, 1, 1)).validate().is_ok());
    }

    #[test]
    fn test_matches() {
        let created = at(2024, 3, 10);
        let ticket = TicketBuilder::new()
            .description("Printer broken")
            .status(Status::InProgress)
            .created_at(created)
            .assigned_agent(Agent::new(42, "Agent001"))
            .build();

        assert!(TicketFilter::new().matches(&ticket));
        assert!(
            TicketFilter::new()
                .with_statuses([Status::New, Status::InProgress])
                .matches(&ticket)
        );
        assert!(!TicketFilter::new().with_statuses([Status::New]).matches(&ticket));
        assert!(
            TicketFilter::new()
                .with_start_date(created)
                .with_end_date(created)
                .matches(&ticket)
        );
        assert!(
            !TicketFilter::new()
                .with_start_date(created + Duration::seconds(1))
                .matches(&ticket)
        );
        assert!(TicketFilter::new().with_assigned_agent("Agent001").matches(&ticket));
        assert!(!TicketFilter::new().with_assigned_agent("Agent002").matches(&ticket));
    }

    #[test]
    fn test_unassigned_ticket_never_matches_agent_filter() {
        let ticket = TicketBuilder::new().description("Unassigned").build();
        assert!(!TicketFilter::new().with_assigned_agent("Agent001").matches(&ticket));
    }

    #[test]
    fn test_parse_date_bound() {
        assert_eq!(parse_date_bound("2024-01-15").unwrap(), at(2024, 1, 15));
        assert_eq!(
            parse_date_bound("2024-01-15T00:00:00").unwrap(),
            at(2024, 1, 15)
        );
        assert_eq!(
            parse_date_bound("2024-01-15T00:00:00.123456").unwrap(),
            at(2024, 1, 15) + Duration::microseconds(123_456)
        );
        assert_eq!(
            parse_date_bound("2024-01-15T02:00:00+02:00").unwrap(),
            at(2024, 1, 15)
        );
        assert!(matches!(
            parse_date_bound("yesterday"),
            Err(TicketDeskError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_parse_statuses() {
        assert_eq!(
            parse_statuses("NEW,IN_PROGRESS").unwrap(),
            vec![Status::New, Status::InProgress]
        );
        assert_eq!(parse_statuses(" closed , ").unwrap(), vec![Status::Closed]);
        assert!(parse_statuses("").unwrap().is_empty());
        assert!(parse_statuses("NEW,DONE").is_err());
    }
}
