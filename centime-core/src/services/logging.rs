//! Logging service - structured event logging to a JSON-lines file
//!
//! Privacy-safe diagnostics stored in logs.jsonl under the app
//! directory. No user data (amounts, merchants, message bodies) is
//! ever logged. Call sites swallow logging failures; diagnostics must
//! never break a user operation.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique ID based on timestamp + counter
fn generate_id() -> u64 {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;

    // Lower 48 bits of timestamp, upper 16 bits of counter: 65536
    // unique IDs per millisecond.
    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    (timestamp << 16) | counter
}

/// Get current unix timestamp in milliseconds
fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}

/// Detect the current platform
fn detect_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "linux") {
        "linux"
    } else {
        "unknown"
    }
}

/// Entry point for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryPoint {
    Cli,
    Batch,
}

impl EntryPoint {
    fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Cli => "cli",
            EntryPoint::Batch => "batch",
        }
    }
}

/// A log event to be recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
}

impl LogEvent {
    /// Create a new log event with just an event name
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            source: None,
            command: None,
            error_message: None,
            error_details: None,
        }
    }

    /// Set the message-source context
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the command context (for CLI events)
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set error information
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Set error details (additional context)
    pub fn with_error_details(mut self, details: impl Into<String>) -> Self {
        self.error_details = Some(details.into());
        self
    }
}

/// A log entry as stored on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: i64,
    pub entry_point: String,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_details: Option<String>,
}

/// Service for structured event logging
///
/// Manages logs.jsonl and provides methods for recording events and
/// querying the log history.
pub struct LoggingService {
    log_path: PathBuf,
    write_lock: Mutex<()>,
    entry_point: EntryPoint,
    app_version: String,
    platform: &'static str,
}

impl LoggingService {
    /// Create a new logging service writing to logs.jsonl in the
    /// centime directory
    pub fn new(
        centime_dir: &Path,
        entry_point: EntryPoint,
        app_version: impl Into<String>,
    ) -> Result<Self> {
        std::fs::create_dir_all(centime_dir)?;
        Ok(Self {
            log_path: centime_dir.join("logs.jsonl"),
            write_lock: Mutex::new(()),
            entry_point,
            app_version: app_version.into(),
            platform: detect_platform(),
        })
    }

    /// Log an event
    ///
    /// The entry_point, app_version, and platform are added
    /// automatically from the service configuration.
    pub fn log(&self, event: LogEvent) -> Result<()> {
        let entry = LogEntry {
            id: generate_id(),
            timestamp: now_ms(),
            entry_point: self.entry_point.as_str().to_string(),
            app_version: self.app_version.clone(),
            platform: self.platform.to_string(),
            event: event.event,
            source: event.source,
            command: event.command,
            error_message: event.error_message,
            error_details: event.error_details,
        };

        let line = serde_json::to_string(&entry)?;
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Log a simple event with just a name
    pub fn log_event(&self, event: &str) -> Result<()> {
        self.log(LogEvent::new(event))
    }

    /// Log a CLI command execution
    pub fn log_command(&self, command: &str) -> Result<()> {
        self.log(LogEvent::new("command_executed").with_command(command))
    }

    /// Log an error
    pub fn log_error(&self, event: &str, message: &str, details: Option<&str>) -> Result<()> {
        let mut log_event = LogEvent::new(event).with_error(message);
        if let Some(d) = details {
            log_event = log_event.with_error_details(d);
        }
        self.log(log_event)
    }

    fn read_all(&self) -> Result<Vec<LogEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }
        let reader = BufReader::new(File::open(&self.log_path)?);
        // Corrupt lines are skipped, not fatal.
        Ok(reader
            .lines()
            .filter_map(|line| line.ok())
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(&line).ok())
            .collect())
    }

    /// Query recent log entries, newest first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let mut entries = self.read_all()?;
        entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Query log entries with errors, newest first
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        let mut entries = self.read_all()?;
        entries.retain(|e| e.error_message.is_some());
        entries.sort_by_key(|e| std::cmp::Reverse(e.timestamp));
        entries.truncate(limit);
        Ok(entries)
    }

    /// Get the total number of log entries
    pub fn count(&self) -> Result<u64> {
        Ok(self.read_all()?.len() as u64)
    }

    /// Delete logs older than the specified timestamp (unix ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<u64> {
        let entries = self.read_all()?;
        let kept: Vec<&LogEntry> = entries
            .iter()
            .filter(|e| e.timestamp >= timestamp_ms)
            .collect();
        let deleted = entries.len() - kept.len();

        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| anyhow!("Lock poisoned: {}", e))?;
        let mut file = File::create(&self.log_path)?;
        for entry in kept {
            writeln!(file, "{}", serde_json::to_string(entry)?)?;
        }
        Ok(deleted as u64)
    }

    /// Export logs to a file for troubleshooting
    pub fn export(&self, output_path: &Path) -> Result<PathBuf> {
        if self.log_path.exists() {
            std::fs::copy(&self.log_path, output_path)?;
        } else {
            File::create(output_path)?;
        }
        Ok(output_path.to_path_buf())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_event() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log_event("test_event").unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "test_event");
        assert_eq!(entries[0].entry_point, "cli");
        assert_eq!(entries[0].app_version, "1.0.0");
    }

    #[test]
    fn test_log_with_context() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Batch, "2.0.0").unwrap();

        service
            .log(
                LogEvent::new("sync_completed")
                    .with_source("demo")
                    .with_command("sync"),
            )
            .unwrap();

        let entries = service.get_recent(10).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].event, "sync_completed");
        assert_eq!(entries[0].source, Some("demo".to_string()));
        assert_eq!(entries[0].command, Some("sync".to_string()));
        assert_eq!(entries[0].entry_point, "batch");
    }

    #[test]
    fn test_log_error() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log_event("plain").unwrap();
        service
            .log_error("import_failed", "bad file", Some("line 42"))
            .unwrap();

        let errors = service.get_errors(10).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].event, "import_failed");
        assert_eq!(errors[0].error_message, Some("bad file".to_string()));
        assert_eq!(errors[0].error_details, Some("line 42".to_string()));
    }

    #[test]
    fn test_count_and_delete() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();

        service.log_event("event1").unwrap();
        service.log_event("event2").unwrap();
        service.log_event("event3").unwrap();

        assert_eq!(service.count().unwrap(), 3);

        let deleted = service.delete_before(now_ms() + 1000).unwrap();
        assert_eq!(deleted, 3);
        assert_eq!(service.count().unwrap(), 0);
    }

    #[test]
    fn test_corrupt_lines_are_skipped() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
        service.log_event("good").unwrap();

        let mut file = OpenOptions::new()
            .append(true)
            .open(service.log_path())
            .unwrap();
        writeln!(file, "this is not json").unwrap();
        drop(file);

        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_export() {
        let dir = tempdir().unwrap();
        let service = LoggingService::new(dir.path(), EntryPoint::Cli, "1.0.0").unwrap();
        service.log_event("test_event").unwrap();

        let export_path = dir.path().join("export.jsonl");
        service.export(&export_path).unwrap();
        assert!(export_path.exists());
    }
}
