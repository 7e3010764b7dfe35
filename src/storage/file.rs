use crate::core::{Agent, Ticket, TicketId};
use crate::error::{Result, TicketDeskError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const TICKETS_DIR: &str = "tickets";
const AGENTS_FILE: &str = "agents.yaml";
const STATE_FILE: &str = "state.yaml";

/// Bookkeeping persisted next to the ticket documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageState {
    /// Highest ticket id handed out so far
    pub last_ticket_id: u64,
}

/// Record store keeping one YAML document per ticket
///
/// ```text
/// <root>/
///   state.yaml
///   agents.yaml
///   tickets/<id>.yaml
/// ```
///
/// Documents are written to a temporary file and renamed into place, so a
/// reader never observes a half-written ticket. Writes from this process are
/// serialised through a mutex; the store does not coordinate with other
/// processes sharing the directory.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open a storage directory, creating its layout if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let storage = Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        };
        storage.ensure_directories()?;
        Ok(storage)
    }

    /// Root directory of the store
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory layout
    pub fn ensure_directories(&self) -> Result<()> {
        fs::create_dir_all(self.tickets_dir())?;
        Ok(())
    }

    fn tickets_dir(&self) -> PathBuf {
        self.root.join(TICKETS_DIR)
    }

    fn ticket_path(&self, id: TicketId) -> PathBuf {
        self.tickets_dir().join(format!("{id}.yaml"))
    }

    /// Load a ticket, or `None` when no document exists for the id
    pub fn load_ticket(&self, id: TicketId) -> Result<Option<Ticket>> {
        let path = self.ticket_path(id);
        if !path.exists() {
            return Ok(None);
        }
        read_yaml(&path).map(Some)
    }

    /// Load every ticket, ordered by id
    pub fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        let mut tickets = Vec::new();
        for entry in fs::read_dir(self.tickets_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            tickets.push(read_yaml::<Ticket>(&path)?);
        }
        tickets.sort_by_key(|ticket| ticket.id);
        Ok(tickets)
    }

    /// Highest id among the ticket documents on disk
    fn highest_document_id(&self) -> Result<u64> {
        let mut highest = 0;
        for entry in fs::read_dir(self.tickets_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("yaml") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                highest = highest.max(id);
            }
        }
        Ok(highest)
    }

    /// Persist a ticket, allocating the next id for a ticket without one
    ///
    /// New ids come after both the recorded counter and the highest document
    /// on disk, so a stale or missing `state.yaml` never reuses an id. The
    /// counter is saved before the document; a failed document write leaves
    /// at most an unused id behind.
    pub fn store_ticket(&self, mut ticket: Ticket) -> Result<Ticket> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TicketDeskError::storage("file storage lock poisoned"))?;

        let mut state = self.load_state()?;
        let last_id = state.last_ticket_id.max(self.highest_document_id()?);

        let id = match ticket.id {
            Some(id) => id,
            None => {
                let id = TicketId::new(last_id + 1);
                if self.ticket_path(id).exists() {
                    return Err(TicketDeskError::storage(format!(
                        "ticket document {id} already exists"
                    )));
                }
                id
            },
        };

        let last_id = last_id.max(id.get());
        if last_id != state.last_ticket_id {
            state.last_ticket_id = last_id;
            self.save_state(&state)?;
        }

        ticket.id = Some(id);
        write_yaml(&self.ticket_path(id), &ticket)?;

        tracing::debug!(ticket_id = %id, "Stored ticket document");
        Ok(ticket)
    }

    /// Load the storage bookkeeping, defaulting when absent
    pub fn load_state(&self) -> Result<StorageState> {
        let path = self.root.join(STATE_FILE);
        if !path.exists() {
            return Ok(StorageState::default());
        }
        read_yaml(&path)
    }

    /// Save the storage bookkeeping
    pub fn save_state(&self, state: &StorageState) -> Result<()> {
        write_yaml(&self.root.join(STATE_FILE), state)
    }

    /// Load all agents
    pub fn load_agents(&self) -> Result<Vec<Agent>> {
        let path = self.root.join(AGENTS_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        read_yaml(&path)
    }

    /// Merge agents into `agents.yaml`, replacing entries with the same id
    pub fn seed_agents(&self, agents: &[Agent]) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| TicketDeskError::storage("file storage lock poisoned"))?;

        let mut existing = self.load_agents()?;
        for agent in agents {
            match existing.iter_mut().find(|a| a.id == agent.id) {
                Some(slot) => *slot = agent.clone(),
                None => existing.push(agent.clone()),
            }
        }
        existing.sort_by_key(|agent| agent.id);
        write_yaml(&self.root.join(AGENTS_FILE), &existing)
    }
}

fn read_yaml<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

fn write_yaml<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_yaml::to_string(value)?;
    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}
