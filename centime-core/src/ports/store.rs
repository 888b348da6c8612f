//! Transaction store port - persistence abstraction

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::result::Result;
use crate::domain::TransactionRecord;

/// Transaction persistence abstraction
///
/// This trait defines all record operations. Implementations (adapters)
/// provide the actual storage logic; services only see this interface.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Add a new record. Fails with a store error when another record
    /// already carries the same source fingerprint.
    async fn add_record(&self, record: &TransactionRecord) -> Result<()>;

    /// Get all records
    async fn get_records(&self) -> Result<Vec<TransactionRecord>>;

    /// Get records whose transaction date is on or after `since`
    async fn get_records_since(&self, since: NaiveDate) -> Result<Vec<TransactionRecord>>;

    /// Get record by ID
    async fn get_record_by_id(&self, id: Uuid) -> Result<Option<TransactionRecord>>;

    /// Look up a record by its dedup fingerprint
    async fn find_by_fingerprint(&self, fingerprint: &str)
        -> Result<Option<TransactionRecord>>;

    /// Total number of stored records
    async fn record_count(&self) -> Result<usize>;

    /// Earliest and latest transaction dates, when any records exist
    async fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>>;

    /// Delete all records
    async fn clear_records(&self) -> Result<usize>;
}
