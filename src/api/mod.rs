//! HTTP API for the ticket desk
//!
//! Exposes the lifecycle operations as a small JSON API:
//!
//! | Method | Path                                | Operation    |
//! |--------|-------------------------------------|--------------|
//! | POST   | `/tickets`                          | create       |
//! | GET    | `/tickets`                          | list         |
//! | GET    | `/tickets/:id`                      | get by id    |
//! | PUT    | `/tickets/:id`                      | update       |
//! | PUT    | `/tickets/:id/assign/:agent_id`     | assign agent |
//! | PUT    | `/tickets/:id/resolve`              | resolve      |
//! | PUT    | `/tickets/:id/close`                | close        |
//! | GET    | `/health`                           | liveness     |

pub mod error;
pub mod handlers;

pub use error::ApiError;
pub use handlers::{AppState, ListTicketsQuery};

use crate::config::ServerConfig;
use crate::error::Result;
use crate::service::TicketService;
use axum::{
    Router,
    routing::{get, put},
};
use tower_http::trace::TraceLayer;

/// Build the application router over a ticket service
pub fn router(service: TicketService) -> Router {
    Router::new()
        .route(
            "/tickets",
            get(handlers::list_tickets).post(handlers::create_ticket),
        )
        .route(
            "/tickets/:id",
            get(handlers::get_ticket).put(handlers::update_ticket),
        )
        .route("/tickets/:id/assign/:agent_id", put(handlers::assign_agent))
        .route("/tickets/:id/resolve", put(handlers::resolve_ticket))
        .route("/tickets/:id/close", put(handlers::close_ticket))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

/// Serve the API until Ctrl-C is received
pub async fn serve(config: &ServerConfig, service: TicketService) -> Result<()> {
    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %listener.local_addr()?, "Ticket desk listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        },
    }
}
