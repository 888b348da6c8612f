//! Ingest service - turn raw messages into stored transaction records
//!
//! One code path for all entry points: device batches, registered
//! message sources and CSV imports all funnel through `submit_batch`,
//! so deduplication and enrichment behave identically everywhere.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::result::Error;
use crate::domain::{ParsedTransaction, RawMessage, Source, TransactionRecord};
use crate::parse::parse_message;
use crate::ports::{MessageSource, TransactionStore};

/// Stored description is the message body truncated to this many chars
const DESCRIPTION_MAX_CHARS: usize = 500;

/// Ingest service for message batches, source syncs and CSV imports
pub struct IngestService {
    store: Arc<dyn TransactionStore>,
    sources: HashMap<String, Arc<dyn MessageSource>>,
}

impl IngestService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self {
            store,
            sources: HashMap::new(),
        }
    }

    /// Register a message source (e.g. the demo generator)
    pub fn register_source(&mut self, source: Arc<dyn MessageSource>) {
        self.sources.insert(source.name().to_string(), source);
    }

    /// Process a batch of raw messages.
    ///
    /// Collect-and-continue: one bad message never sinks the batch.
    /// Non-actionable messages count as failed, fingerprint hits as
    /// duplicates; only genuinely new records land in `created_ids`.
    pub async fn submit_batch(&self, messages: &[RawMessage]) -> Result<BatchSubmitResult> {
        let mut result = BatchSubmitResult {
            received_count: messages.len() as i64,
            ..Default::default()
        };

        for message in messages {
            let parsed = parse_message(message);
            if !parsed.is_actionable() {
                result.failed_count += 1;
                continue;
            }

            let fingerprint = TransactionRecord::dedup_key(
                parsed.reference_number.as_deref(),
                &message.sender,
                &message.body,
                message.timestamp_ms(),
            );

            // Pre-check keeps the common resubmission path cheap; the
            // store still enforces uniqueness for concurrent writers.
            if self.store.find_by_fingerprint(&fingerprint).await?.is_some() {
                result.duplicate_count += 1;
                continue;
            }

            let record = build_record(message, &parsed, fingerprint);
            if record.validate().is_err() {
                result.failed_count += 1;
                continue;
            }

            match self.store.add_record(&record).await {
                Ok(()) => {
                    result.processed_count += 1;
                    result.created_ids.push(record.id);
                }
                Err(Error::Store(_)) => result.duplicate_count += 1,
                Err(e) => return Err(e.into()),
            }
        }

        Ok(result)
    }

    /// Sync messages from a registered source
    pub async fn sync_from_source(&self, name: &str) -> Result<SourceSyncResult> {
        if self.sources.is_empty() {
            anyhow::bail!("No message sources configured");
        }
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown message source: {}", name))?;

        let fetched = source.fetch_messages(None)?;
        let batch = self.submit_batch(&fetched.messages).await?;

        Ok(SourceSyncResult {
            source: name.to_string(),
            batch,
            warnings: fetched.warnings,
        })
    }

    /// Import messages from a CSV export.
    ///
    /// Header names are matched by alias, so exports from different
    /// backup apps work without a mapping step. Rows missing a sender,
    /// body or parseable timestamp are skipped and counted.
    pub async fn import_csv(&self, file_path: &Path, preview_only: bool) -> Result<CsvImportResult> {
        let mut reader = csv::Reader::from_path(file_path).context("Failed to read CSV file")?;
        let headers = reader.headers()?.clone();

        let sender_idx = find_column(&headers, &["sender", "address", "from", "number"])
            .context("No sender column found in CSV")?;
        let body_idx = find_column(&headers, &["body", "message", "text", "sms"])
            .context("No body column found in CSV")?;
        let timestamp_idx = find_column(&headers, &["timestamp", "date", "received", "time"])
            .context("No timestamp column found in CSV")?;
        let read_idx = find_column(&headers, &["read"]);

        let mut messages = Vec::new();
        let mut skipped_rows = 0i64;

        for row in reader.records() {
            let row = row?;
            let sender = row.get(sender_idx).unwrap_or("").trim();
            let body = row.get(body_idx).unwrap_or("").trim();
            let timestamp = row.get(timestamp_idx).unwrap_or("").trim();

            if sender.is_empty() || body.is_empty() {
                skipped_rows += 1;
                continue;
            }
            let received_at = match parse_csv_timestamp(timestamp) {
                Some(ts) => ts,
                None => {
                    skipped_rows += 1;
                    continue;
                }
            };
            let read = read_idx
                .and_then(|i| row.get(i))
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(true);

            messages.push(RawMessage::new(sender, body, received_at, read));
        }

        let rows_read = messages.len() as i64 + skipped_rows;

        let batch = if preview_only {
            let actionable = messages
                .iter()
                .filter(|m| parse_message(m).is_actionable())
                .count() as i64;
            BatchSubmitResult {
                received_count: messages.len() as i64,
                processed_count: actionable,
                failed_count: messages.len() as i64 - actionable,
                ..Default::default()
            }
        } else {
            self.submit_batch(&messages).await?
        };

        Ok(CsvImportResult {
            rows_read,
            skipped_rows,
            preview: preview_only,
            batch,
        })
    }

    /// Sync cursor state for device clients.
    ///
    /// Records keep a transaction date, not a receipt timestamp, so the
    /// cursor is the latest sms-sourced date at midnight UTC in epoch
    /// milliseconds. Good enough for "fetch everything newer than".
    pub async fn sync_status(&self) -> Result<SyncStatus> {
        let records = self.store.get_records().await?;
        let total_synced = records
            .iter()
            .filter(|r| r.source == Source::Sms)
            .count() as i64;
        let last_synced_at = records
            .iter()
            .filter(|r| r.source == Source::Sms)
            .map(|r| r.transaction_date)
            .max()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis());

        Ok(SyncStatus {
            last_synced_at,
            total_synced,
        })
    }
}

/// Build the stored record for an actionable parse result
fn build_record(
    message: &RawMessage,
    parsed: &ParsedTransaction,
    fingerprint: String,
) -> TransactionRecord {
    // is_actionable guaranteed the amount upstream
    let amount = parsed.amount.unwrap_or_default();

    let mut record = TransactionRecord::new(
        amount,
        parsed.direction,
        parsed.category,
        message.received_at.date_naive(),
        Source::Sms,
    );
    record.description = Some(message.body.chars().take(DESCRIPTION_MAX_CHARS).collect());
    record.merchant = parsed.merchant.clone();
    record.account_suffix = parsed.account_suffix.clone();
    record.bank_name = parsed
        .bank_name
        .clone()
        .or_else(|| Some(message.sender.trim().to_string()));
    record.balance = parsed.balance;
    record.reference_number = parsed.reference_number.clone();
    record.source_fingerprint = Some(fingerprint);
    record
}

fn find_column(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.trim().to_lowercase();
        aliases.iter().any(|a| h.contains(a))
    })
}

/// Accept epoch milliseconds, epoch seconds, RFC 3339 and the common
/// backup-app date formats
fn parse_csv_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(epoch) = raw.parse::<i64>() {
        // Heuristic split between seconds and milliseconds.
        let ms = if epoch.abs() < 100_000_000_000 {
            epoch.checked_mul(1000)?
        } else {
            epoch
        };
        return DateTime::from_timestamp_millis(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M", "%Y-%m-%d"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
        if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSubmitResult {
    pub received_count: i64,
    pub processed_count: i64,
    pub failed_count: i64,
    pub duplicate_count: i64,
    pub created_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSyncResult {
    pub source: String,
    #[serde(flatten)]
    pub batch: BatchSubmitResult,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvImportResult {
    pub rows_read: i64,
    pub skipped_rows: i64,
    pub preview: bool,
    #[serde(flatten)]
    pub batch: BatchSubmitResult,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_synced_at: Option<i64>,
    pub total_synced: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStore;
    use chrono::TimeZone;

    fn service() -> IngestService {
        IngestService::new(Arc::new(InMemoryStore::new()))
    }

    fn message(sender: &str, body: &str, timestamp_ms: i64) -> RawMessage {
        RawMessage::from_timestamp_ms(sender, body, timestamp_ms, false)
            .expect("test timestamp in range")
    }

    #[tokio::test]
    async fn test_batch_counts() {
        let svc = service();
        let messages = vec![
            message(
                "VM-HDFCBK",
                "Rs.500 debited from A/C XX1234 at SWIGGY. Ref 40291837465",
                1_700_000_000_000,
            ),
            message("Mom", "call me when free", 1_700_000_100_000),
            message("VM-HDFCBK", "Your OTP is 4532. Do not share.", 1_700_000_200_000),
        ];

        let result = svc.submit_batch(&messages).await.unwrap();
        assert_eq!(result.received_count, 3);
        assert_eq!(result.processed_count, 1);
        assert_eq!(result.failed_count, 2);
        assert_eq!(result.duplicate_count, 0);
        assert_eq!(result.created_ids.len(), 1);
    }

    #[tokio::test]
    async fn test_resubmission_is_idempotent() {
        let svc = service();
        let messages = vec![message(
            "VM-HDFCBK",
            "Rs.500 debited from A/C XX1234 at SWIGGY. Ref 40291837465",
            1_700_000_000_000,
        )];

        let first = svc.submit_batch(&messages).await.unwrap();
        assert_eq!(first.processed_count, 1);

        let second = svc.submit_batch(&messages).await.unwrap();
        assert_eq!(second.processed_count, 0);
        assert_eq!(second.duplicate_count, 1);
        assert!(second.created_ids.is_empty());
    }

    #[tokio::test]
    async fn test_record_enrichment() {
        let store = Arc::new(InMemoryStore::new());
        let svc = IngestService::new(store.clone());

        let body = "Rs.500 debited from A/C XX1234 at SWIGGY. Avl Bal Rs.4500";
        svc.submit_batch(&[message("VM-HDFCBK", body, 1_700_000_000_000)])
            .await
            .unwrap();

        let records = store.get_records().await.unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.merchant.as_deref(), Some("SWIGGY"));
        assert_eq!(record.description.as_deref(), Some(body));
        // No bank name in the body, so the sender id stands in.
        assert_eq!(record.bank_name.as_deref(), Some("VM-HDFCBK"));
        assert_eq!(record.source, Source::Sms);
        assert!(record.source_fingerprint.is_some());
    }

    #[tokio::test]
    async fn test_sync_from_unknown_source() {
        let svc = service();
        assert!(svc.sync_from_source("demo").await.is_err());
    }

    #[tokio::test]
    async fn test_sync_status_cursor() {
        let svc = service();
        assert_eq!(svc.sync_status().await.unwrap().last_synced_at, None);

        let ts = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap();
        svc.submit_batch(&[message(
            "VM-HDFCBK",
            "Rs.500 debited from A/C XX1234 at SWIGGY. Ref 40291837465",
            ts.timestamp_millis(),
        )])
        .await
        .unwrap();

        let status = svc.sync_status().await.unwrap();
        assert_eq!(status.total_synced, 1);
        let cursor = status.last_synced_at.unwrap();
        let midnight = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        assert_eq!(cursor, midnight.timestamp_millis());
    }

    #[test]
    fn test_csv_timestamp_formats() {
        assert!(parse_csv_timestamp("1700000000000").is_some());
        assert!(parse_csv_timestamp("1700000000").is_some());
        assert!(parse_csv_timestamp("2025-03-10T14:30:00+05:30").is_some());
        assert!(parse_csv_timestamp("2025-03-10 14:30:00").is_some());
        assert!(parse_csv_timestamp("2025-03-10").is_some());
        assert!(parse_csv_timestamp("not a date").is_none());
    }

    #[tokio::test]
    async fn test_csv_import() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.csv");
        std::fs::write(
            &path,
            "Address,Body,Date,Read\n\
             VM-HDFCBK,Rs.500 debited from A/C XX1234 at SWIGGY. Ref 40291837465,2025-03-10 14:30:00,1\n\
             Mom,call me,2025-03-10 15:00:00,1\n\
             VM-HDFCBK,Rs.300 debited at ZOMATO. Ref 40291837466,,1\n",
        )
        .unwrap();

        let svc = service();
        let result = svc.import_csv(&path, false).await.unwrap();
        assert_eq!(result.rows_read, 3);
        assert_eq!(result.skipped_rows, 1, "row without timestamp skipped");
        assert_eq!(result.batch.processed_count, 1);
        assert_eq!(result.batch.failed_count, 1, "non-financial sender");
        assert!(!result.preview);
    }

    #[tokio::test]
    async fn test_csv_preview_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("backup.csv");
        std::fs::write(
            &path,
            "sender,body,timestamp\n\
             VM-HDFCBK,Rs.500 debited from A/C XX1234 at SWIGGY. Ref 40291837465,1700000000000\n",
        )
        .unwrap();

        let store = Arc::new(InMemoryStore::new());
        let svc = IngestService::new(store.clone());
        let result = svc.import_csv(&path, true).await.unwrap();
        assert!(result.preview);
        assert_eq!(result.batch.processed_count, 1);
        assert_eq!(store.record_count().await.unwrap(), 0);
    }
}
