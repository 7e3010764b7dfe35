//! ticket-desk - Support ticket lifecycle backend
//!
//! Entry point of the `ticket-desk` binary: parses the command line, loads
//! the layered configuration, sets up logging and dispatches to the
//! command handlers.

use clap::Parser;
use std::process;
use ticket_desk::cli::{
    Cli, Commands, ConfigCommands, OutputFormatter,
    handlers::{handle_config_show, handle_serve},
};
use ticket_desk::config::Config;
use ticket_desk::error::Result;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    let formatter = OutputFormatter::new(false, cli.no_color);

    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    let config = effective_config(Config::load(cli.config.as_deref())?, &cli.command);
    config.validate()?;
    init_tracing(&config.logging.level, cli.verbose);

    match cli.command {
        Commands::Serve { .. } => handle_serve(&config, formatter),
        Commands::Config {
            command: ConfigCommands::Show { json },
        } => handle_config_show(&config, json, formatter),
    }
}

/// Apply the flags of the chosen command on top of the loaded configuration
fn effective_config(config: Config, command: &Commands) -> Config {
    match command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => config.with_overrides(host.clone(), *port, data_dir.clone()),
        Commands::Config { .. } => config,
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
fn init_tracing(level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(error: &ticket_desk::TicketDeskError, formatter: &OutputFormatter) {
    formatter.error(&error.to_string());

    if error.is_config_error() {
        formatter.info("Check the --config file and TICKET_DESK__* environment variables.");
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
