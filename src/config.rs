//! Configuration management for ticket-desk
//!
//! Configuration is layered: built-in defaults, then an optional
//! `ticket-desk.{yaml,toml}` in the working directory (or an explicit file,
//! which must exist), then `TICKET_DESK__`-prefixed environment variables
//! such as `TICKET_DESK__SERVER__PORT=9000`.

use crate::core::Agent;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Base name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_NAME: &str = "ticket-desk";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "TICKET_DESK";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    /// Agents seeded into the record store at startup
    pub agents: Vec<Agent>,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Record store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Memory,
    File,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Data directory for the file backend
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// Directory used by the file backend
    ///
    /// Falls back to the platform data directory, then to `.ticket-desk`
    /// in the working directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_data_dir)
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("dev", "ticket-desk", "ticket-desk").map_or_else(
        || PathBuf::from(".ticket-desk"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load the layered configuration
    ///
    /// An explicit `path` must exist; otherwise a `ticket-desk.*` file in the
    /// working directory is used when present. The result is not validated:
    /// command-line overrides still apply, call [`Config::validate`] after.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_source = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let config: Self = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(file_source)
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Check values the type system cannot express
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(invalid("server.host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(invalid("server.port must not be 0"));
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if !seen.insert(agent.id) {
                return Err(invalid(&format!("duplicate agent id {}", agent.id)));
            }
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values
    #[must_use]
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        data_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        if let Some(dir) = data_dir {
            self.storage.backend = StorageBackend::File;
            self.storage.path = Some(dir);
        }
        self
    }
}

fn invalid(message: &str) -> crate::error::TicketDeskError {
    ::config::ConfigError::Message(message.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TicketDeskError;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.logging.level, "info");
        assert!(config.agents.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "desk.yaml",
            r"
server:
  port: 9090
storage:
  backend: file
  path: /var/lib/desk
agents:
  - id: 42
    name: Agent001
",
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir(), PathBuf::from("/var/lib/desk"));
        assert_eq!(config.agents, vec![Agent::new(42, "Agent001")]);
    }

    #[test]
    fn test_load_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "desk.toml",
            "[server]\nhost = \"0.0.0.0\"\n\n[logging]\nlevel = \"debug\"\n",
        );

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.yaml")));
        assert!(matches!(result, Err(TicketDeskError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().unwrap_err().is_config_error());

        let mut config = Config::default();
        config.server.host = "  ".to_string();
        assert!(config.validate().is_err());

        let config = Config {
            agents: vec![Agent::new(1, "a"), Agent::new(1, "b")],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate agent id 1"));
    }

    #[test]
    fn test_overrides_can_repair_loaded_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "desk.yaml", "server:\n  port: 0\n");

        let loaded = Config::load(Some(&path)).unwrap();
        assert!(loaded.validate().is_err());

        let repaired = loaded.with_overrides(None, Some(9000), None);
        assert!(repaired.validate().is_ok());
        assert_eq!(repaired.server.port, 9000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_overrides(
            Some("0.0.0.0".to_string()),
            Some(3000),
            Some(PathBuf::from("/tmp/desk")),
        );
        assert_eq!(config.server.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.data_dir(), PathBuf::from("/tmp/desk"));

        let untouched = Config::default().with_overrides(None, None, None);
        assert_eq!(untouched, Config::default());
    }
}
