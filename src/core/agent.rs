use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(u64);

impl AgentId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Someone a ticket can be assigned to
///
/// Agents are reference data: the lifecycle service looks them up but
/// never changes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
}

impl Agent {
    #[must_use]
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: AgentId::new(id),
            name: name.into(),
        }
    }
}
