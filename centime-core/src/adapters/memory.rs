//! In-memory transaction store
//!
//! Backs unit and service tests; also the model implementation for the
//! fingerprint-uniqueness contract the file store mirrors.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::TransactionRecord;
use crate::ports::TransactionStore;

/// Vec-backed store behind an async RwLock
#[derive(Default)]
pub struct InMemoryStore {
    records: RwLock<Vec<TransactionRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
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
        Ok(())
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
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Direction, Source};
    use rust_decimal::Decimal;

    fn record(date: NaiveDate, fingerprint: Option<&str>) -> TransactionRecord {
        let mut r = TransactionRecord::new(
            Decimal::from(100),
            Direction::Debit,
            Category::Spends,
            date,
            Source::Sms,
        );
        r.source_fingerprint = fingerprint.map(str::to_string);
        r
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[tokio::test]
    async fn test_fingerprint_uniqueness() {
        let store = InMemoryStore::new();
        store.add_record(&record(date(1), Some("abc123"))).await.unwrap();

        let err = store.add_record(&record(date(2), Some("abc123"))).await;
        assert!(matches!(err, Err(Error::Store(_))));

        // Fingerprint-less records never collide.
        store.add_record(&record(date(1), None)).await.unwrap();
        store.add_record(&record(date(1), None)).await.unwrap();
        assert_eq!(store.record_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_since_filter_and_date_range() {
        let store = InMemoryStore::new();
        for day in [3, 10, 20] {
            store.add_record(&record(date(day), None)).await.unwrap();
        }

        let recent = store.get_records_since(date(10)).await.unwrap();
        assert_eq!(recent.len(), 2);

        assert_eq!(
            store.date_range().await.unwrap(),
            Some((date(3), date(20)))
        );

        assert_eq!(store.clear_records().await.unwrap(), 3);
        assert_eq!(store.date_range().await.unwrap(), None);
    }
}
