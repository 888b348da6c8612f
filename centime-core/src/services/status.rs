//! Status service - store overview

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;

use crate::domain::Source;
use crate::ports::TransactionStore;

/// Status service for store summaries
pub struct StatusService {
    store: Arc<dyn TransactionStore>,
}

impl StatusService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    /// Get overall status summary
    pub async fn get_status(&self) -> Result<StatusSummary> {
        let records = self.store.get_records().await?;
        let date_range = self.store.date_range().await?;

        let sms_records = records.iter().filter(|r| r.source == Source::Sms).count() as i64;
        let manual_records = records.len() as i64 - sms_records;
        let debit_records = records.iter().filter(|r| r.is_debit()).count() as i64;

        Ok(StatusSummary {
            total_records: records.len() as i64,
            sms_records,
            manual_records,
            debit_records,
            credit_records: records.len() as i64 - debit_records,
            date_range: DateRange {
                earliest: date_range.map(|(earliest, _)| earliest.to_string()),
                latest: date_range.map(|(_, latest)| latest.to_string()),
            },
        })
    }
}

#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub total_records: i64,
    pub sms_records: i64,
    pub manual_records: i64,
    pub debit_records: i64,
    pub credit_records: i64,
    pub date_range: DateRange,
}

#[derive(Debug, Serialize)]
pub struct DateRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}
