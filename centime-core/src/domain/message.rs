//! Raw inbound message - the input boundary of the parsing pipeline
//!
//! Messages come from an external, permission-gated message store and are
//! never persisted by this crate; only records derived from them are.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A short text message as handed over by the device message store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Sender id as shown by the carrier (e.g. "VM-HDFCBK")
    pub sender: String,
    /// Full message body
    pub body: String,
    /// Receipt time
    pub received_at: DateTime<Utc>,
    /// Whether the user had already read the message
    pub read: bool,
}

impl RawMessage {
    pub fn new(
        sender: impl Into<String>,
        body: impl Into<String>,
        received_at: DateTime<Utc>,
        read: bool,
    ) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            received_at,
            read,
        }
    }

    /// Build from the wire shape used by device clients (epoch milliseconds).
    /// Returns `None` for timestamps outside the representable range.
    pub fn from_timestamp_ms(
        sender: impl Into<String>,
        body: impl Into<String>,
        timestamp_ms: i64,
        read: bool,
    ) -> Option<Self> {
        let received_at = Utc.timestamp_millis_opt(timestamp_ms).single()?;
        Some(Self::new(sender, body, received_at, read))
    }

    /// Receipt time in epoch milliseconds (the unit of the device sync cursor)
    pub fn timestamp_ms(&self) -> i64 {
        self.received_at.timestamp_millis()
    }
}
