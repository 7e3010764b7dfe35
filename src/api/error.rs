//! Mapping of service errors onto HTTP responses

use crate::error::TicketDeskError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error returned by HTTP handlers
///
/// Wraps the crate error and renders it as a plain-text body carrying the
/// error's fixed message, with the status code of its kind.
#[derive(Debug)]
pub struct ApiError(TicketDeskError);

impl ApiError {
    /// HTTP status code for the wrapped error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.0 {
            TicketDeskError::TicketNotFound { .. } => StatusCode::NOT_FOUND,
            TicketDeskError::MissingDescription
            | TicketDeskError::MissingResolutionSummary
            | TicketDeskError::InvalidState(_)
            | TicketDeskError::AgentNotFound { .. }
            | TicketDeskError::InvalidDateRange
            | TicketDeskError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            TicketDeskError::Storage(_)
            | TicketDeskError::Io(_)
            | TicketDeskError::Serialization(_)
            | TicketDeskError::Json(_)
            | TicketDeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The wrapped error
    #[must_use]
    pub const fn inner(&self) -> &TicketDeskError {
        &self.0
    }
}

impl From<TicketDeskError> for ApiError {
    fn from(err: TicketDeskError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.0,
                "Internal server error"
            );
        }

        (status, self.0.user_message()).into_response()
    }
}
