//! `serve` command handler

use crate::api;
use crate::cli::output::OutputFormatter;
use crate::config::{Config, StorageBackend, StorageConfig};
use crate::core::Agent;
use crate::error::Result;
use crate::service::TicketService;
use crate::storage::{FileStorage, InMemoryStore};
use std::sync::Arc;

/// Open the configured record store, seed its agents and wrap it in a service
pub fn build_service(storage: &StorageConfig, agents: &[Agent]) -> Result<TicketService> {
    match storage.backend {
        StorageBackend::Memory => {
            let store = InMemoryStore::new();
            store.seed_agents(agents)?;
            tracing::debug!(agents = agents.len(), "Using in-memory record store");
            Ok(TicketService::from_store(Arc::new(store)))
        },
        StorageBackend::File => {
            let store = FileStorage::open(storage.data_dir())?;
            store.seed_agents(agents)?;
            tracing::debug!(
                root = %store.root().display(),
                agents = agents.len(),
                "Using file record store"
            );
            Ok(TicketService::from_store(Arc::new(store)))
        },
    }
}

/// Run the HTTP API until Ctrl-C
pub fn handle_serve(config: &Config, formatter: &OutputFormatter) -> Result<()> {
    let service = build_service(&config.storage, &config.agents)?;

    formatter.info(&format!(
        "Serving ticket desk on http://{}",
        config.server.bind_address()
    ));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(api::serve(&config.server, service))
}
