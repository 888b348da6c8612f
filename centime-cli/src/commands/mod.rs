//! CLI command implementations

pub mod cash;
pub mod clear;
pub mod demo;
pub mod import;
pub mod logs;
pub mod parse;
pub mod quickadd;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use centime_core::services::{EntryPoint, LogEvent, LoggingService};
use centime_core::CentimeContext;

/// Get the centime directory from environment or default
pub fn get_centime_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CENTIME_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".centime")
    }
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let centime_dir = get_centime_dir();
    std::fs::create_dir_all(&centime_dir).ok()?;
    LoggingService::new(&centime_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Log a command invocation, ignoring any errors
pub fn log_command(logger: &Option<LoggingService>, command: &str) {
    if let Some(l) = logger {
        let _ = l.log_command(command);
    }
}

/// Get or create the centime context
pub fn get_context() -> Result<CentimeContext> {
    let centime_dir = get_centime_dir();

    std::fs::create_dir_all(&centime_dir)
        .with_context(|| format!("Failed to create centime directory: {:?}", centime_dir))?;

    CentimeContext::new(&centime_dir).context("Failed to initialize centime context")
}
