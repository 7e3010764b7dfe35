//! Terminal output for the command line

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Formats command output as colored text or JSON
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    json: bool,
}

impl OutputFormatter {
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{}", message.green());
        }
    }

    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Errors always go to stderr, also in JSON mode
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message.red());
    }

    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
