//! Message source port
//!
//! Defines the interface for fetching raw SMS messages from external
//! sources (device exports, demo data, CSV files, etc.)

use chrono::{DateTime, Utc};

use crate::domain::result::Result;
use crate::domain::RawMessage;

/// Result of fetching messages from a source
#[derive(Debug, Default)]
pub struct FetchMessagesResult {
    pub messages: Vec<RawMessage>,
    pub warnings: Vec<String>,
}

/// Message source trait
///
/// Implementations fetch raw messages from external sources. The
/// IngestService uses this trait to sync without knowing the specifics
/// of each source (demo, CSV, etc.)
pub trait MessageSource: Send + Sync {
    /// Source name (e.g., "demo", "csv")
    fn name(&self) -> &str;

    /// Fetch messages, optionally only those received after `since`
    fn fetch_messages(&self, since: Option<DateTime<Utc>>) -> Result<FetchMessagesResult>;
}
