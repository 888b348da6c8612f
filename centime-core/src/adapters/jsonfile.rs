//! JSON file transaction store
//!
//! Records live in a single pretty-printed JSON array on disk. The
//! whole file is loaded at construction and rewritten after every
//! mutation while the write lock is held, so the in-memory view and
//! the file never diverge. Plenty fast at personal-finance scale.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::TransactionRecord;
use crate::ports::TransactionStore;

pub struct JsonFileStore {
    path: PathBuf,
    records: RwLock<Vec<TransactionRecord>>,
}

impl JsonFileStore {
    /// Open a store at `path`, creating parent directories as needed.
    /// A missing file means an empty store, not an error.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let records = Self::load(&path)?;
        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Vec<TransactionRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = serde_json::from_str(&contents)?;
        Ok(records)
    }

    /// Rewrite the backing file. Callers hold the write lock.
    fn persist(&self, records: &[TransactionRecord]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStore for JsonFileStore {
    async fn add_record(&self, record: &TransactionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(fingerprint) = &record.source_fingerprint {
            let exists = records
                .iter()
                .any(|r| r.source_fingerprint.as_deref() == Some(fingerprint.as_str()));
            if exists {
                return Err(Error::store(format!(
                    "record with fingerprint {} already exists",
                    fingerprint
                )));
            }
        }
        records.push(record.clone());
        self.persist(&records)
    }

    async fn get_records(&self) -> Result<Vec<TransactionRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn get_records_since(&self, since: NaiveDate) -> Result<Vec<TransactionRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.transaction_date >= since)
            .cloned()
            .collect())
    }

    async fn get_record_by_id(&self, id: Uuid) -> Result<Option<TransactionRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_fingerprint(
        &self,
        fingerprint: &str,
    ) -> Result<Option<TransactionRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.source_fingerprint.as_deref() == Some(fingerprint))
            .cloned())
    }

    async fn record_count(&self) -> Result<usize> {
        Ok(self.records.read().await.len())
    }

    async fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let records = self.records.read().await;
        let min = records.iter().map(|r| r.transaction_date).min();
        let max = records.iter().map(|r| r.transaction_date).max();
        Ok(min.zip(max))
    }

    async fn clear_records(&self) -> Result<usize> {
        let mut records = self.records.write().await;
        let count = records.len();
        records.clear();
        self.persist(&records)?;
        Ok(count)
    }
}
