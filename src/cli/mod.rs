//! Command-line interface for ticket-desk

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ticket lifecycle backend
#[derive(Parser, Debug)]
#[command(name = "ticket-desk", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API until interrupted
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Persist records under this directory instead of in memory
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show {
        /// Print as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}
