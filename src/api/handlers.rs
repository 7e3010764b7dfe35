//! HTTP handlers for the ticket API
//!
//! Handlers only translate between HTTP and the lifecycle service; every
//! rule lives in [`TicketService`].

use super::error::ApiError;
use crate::core::{AgentId, TicketId};
use crate::error::{Result, TicketDeskError};
use crate::service::{
    NewTicket, TicketFilter, TicketService, TicketUpdate, TicketView, parse_date_bound,
    parse_statuses,
};
use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// State shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: TicketService,
}

/// Query string of `GET /tickets`
///
/// `status` may be repeated and each value may hold a comma-separated list,
/// so `status=NEW,IN_PROGRESS` and `status=NEW&status=IN_PROGRESS` are the
/// same filter. Empty parameters are treated as absent; unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub status: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub assigned_agent: Option<String>,
}

impl ListTicketsQuery {
    /// Decode a raw `application/x-www-form-urlencoded` query string
    pub fn parse(raw: &str) -> Result<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .map_err(|e| TicketDeskError::InvalidQuery(e.to_string()))?;

        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "status" => query.status.push(value),
                "startDate" => query.start_date = Some(value),
                "endDate" => query.end_date = Some(value),
                "assignedAgent" => query.assigned_agent = Some(value),
                _ => {},
            }
        }
        Ok(query)
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl TryFrom<ListTicketsQuery> for TicketFilter {
    type Error = TicketDeskError;

    /// Date bounds are checked first so an inverted range is reported
    /// whatever the other parameters hold.
    fn try_from(query: ListTicketsQuery) -> Result<Self> {
        let mut filter = Self::new();

        if let Some(start) = non_empty(query.start_date.as_ref()) {
            filter = filter.with_start_date(parse_date_bound(start)?);
        }
        if let Some(end) = non_empty(query.end_date.as_ref()) {
            filter = filter.with_end_date(parse_date_bound(end)?);
        }
        filter.validate()?;

        let mut statuses = Vec::new();
        for value in &query.status {
            statuses.extend(parse_statuses(value)?);
        }
        statuses.dedup();
        if !statuses.is_empty() {
            filter = filter.with_statuses(statuses);
        }

        if let Some(agent) = non_empty(query.assigned_agent.as_ref()) {
            filter = filter.with_assigned_agent(agent);
        }

        Ok(filter)
    }
}

/// Run a service call on the blocking thread pool
///
/// The record stores do synchronous I/O, so service calls stay off the
/// async worker threads. A task that fails to complete is an internal error.
async fn run_blocking<T, F>(service: TicketService, operation: F) -> std::result::Result<T, ApiError>
where
    F: FnOnce(&TicketService) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || operation(&service))
        .await
        .map_err(|e| TicketDeskError::storage(format!("ticket task failed: {e}")))?
        .map_err(ApiError::from)
}

/// `POST /tickets`
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(request): Json<NewTicket>,
) -> std::result::Result<(StatusCode, Json<TicketView>), ApiError> {
    let ticket = run_blocking(state.service, move |service| service.create(request)).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// `PUT /tickets/:id/assign/:agent_id`
pub async fn assign_agent(
    State(state): State<AppState>,
    Path((ticket_id, agent_id)): Path<(TicketId, AgentId)>,
) -> std::result::Result<Json<TicketView>, ApiError> {
    run_blocking(state.service, move |service| {
        service.assign_agent(ticket_id, agent_id)
    })
    .await
    .map(Json)
}

/// `PUT /tickets/:id/resolve`
pub async fn resolve_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<TicketId>,
) -> std::result::Result<Json<TicketView>, ApiError> {
    run_blocking(state.service, move |service| service.resolve(ticket_id))
        .await
        .map(Json)
}

/// `PUT /tickets/:id/close`
pub async fn close_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<TicketId>,
) -> std::result::Result<Json<TicketView>, ApiError> {
    run_blocking(state.service, move |service| service.close(ticket_id))
        .await
        .map(Json)
}

/// `PUT /tickets/:id`
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<TicketId>,
    Json(update): Json<TicketUpdate>,
) -> std::result::Result<Json<TicketView>, ApiError> {
    run_blocking(state.service, move |service| service.update(ticket_id, update))
        .await
        .map(Json)
}

/// `GET /tickets/:id`
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<TicketId>,
) -> std::result::Result<Json<TicketView>, ApiError> {
    run_blocking(state.service, move |service| service.get_by_id(ticket_id))
        .await
        .map(Json)
}

/// `GET /tickets`
pub async fn list_tickets(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> std::result::Result<Json<Vec<TicketView>>, ApiError> {
    let query = ListTicketsQuery::parse(raw.as_deref().unwrap_or_default())?;
    let filter = TicketFilter::try_from(query)?;
    run_blocking(state.service, move |service| service.list(&filter))
        .await
        .map(Json)
}

/// `GET /health`
///
/// Liveness only: it does not touch the record store.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
