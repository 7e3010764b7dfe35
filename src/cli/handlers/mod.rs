//! Command handlers
//!
//! Each handler receives the loaded configuration and the output formatter
//! and runs one subcommand to completion.

mod config;
mod serve;

pub use config::handle_config_show;
pub use serve::{build_service, handle_serve};
