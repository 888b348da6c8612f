//! Transaction record domain model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::category::Category;

/// Money flow direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Debit => "debit",
            Direction::Credit => "credit",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a record entered the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Sms,
    Manual,
}

/// A persisted financial event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    pub amount: Decimal,
    pub direction: Direction,
    pub category: Category,
    pub subcategory: Option<String>,
    /// Tags for reconciliation (e.g. "cash", "cash_spend", "cash_withdrawal")
    pub tags: Vec<String>,
    /// Message body (truncated) or manual-entry note
    pub description: Option<String>,
    pub merchant: Option<String>,
    pub account_suffix: Option<String>,
    pub bank_name: Option<String>,
    pub balance: Option<Decimal>,
    pub reference_number: Option<String>,
    pub source: Source,
    /// Dedup key for sms-sourced records; manual entries carry none
    pub source_fingerprint: Option<String>,
    pub transaction_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Create a new record with required fields
    pub fn new(
        amount: Decimal,
        direction: Direction,
        category: Category,
        transaction_date: NaiveDate,
        source: Source,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            direction,
            category,
            subcategory: None,
            tags: Vec::new(),
            description: None,
            merchant: None,
            account_suffix: None,
            bank_name: None,
            balance: None,
            reference_number: None,
            source,
            source_fingerprint: None,
            transaction_date,
            created_at: Utc::now(),
        }
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Compute the stable dedup key for an ingested message.
    ///
    /// The reference number is the key when the extractor found one
    /// (bank-issued references are already unique per transaction).
    /// Otherwise: SHA256 of sender + normalized body + minute bucket,
    /// truncated to 16 hex chars. The bucket makes redeliveries with a
    /// slightly shifted receipt timestamp collapse onto one key.
    pub fn dedup_key(
        reference_number: Option<&str>,
        sender: &str,
        body: &str,
        timestamp_ms: i64,
    ) -> String {
        if let Some(reference) = reference_number {
            return reference.trim().to_string();
        }

        let bucket = timestamp_ms.div_euclid(60_000);
        let key_source = format!(
            "{}|{}|{}",
            sender.trim().to_lowercase(),
            Self::normalize_body(body),
            bucket
        );

        let mut hasher = Sha256::new();
        hasher.update(key_source.as_bytes());
        let result = hasher.finalize();
        hex::encode(&result[..8]) // 16 hex chars
    }

    /// Normalize a message body for fingerprint comparison: lower-case and
    /// keep only ASCII alphanumerics, so whitespace and punctuation
    /// differences between redeliveries do not defeat deduplication.
    pub fn normalize_body(body: &str) -> String {
        body.to_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect()
    }

    /// Normalize tags: deduplicate, trim whitespace, remove empty
    pub fn normalize_tags(tags: &[String]) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();

        for tag in tags {
            let trimmed = tag.trim().to_string();
            if !trimmed.is_empty() && seen.insert(trimmed.clone()) {
                result.push(trimmed);
            }
        }

        result
    }

    /// Check the hard invariants before persistence
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.amount <= Decimal::ZERO {
            return Err("amount must be positive");
        }
        if let Some(merchant) = &self.merchant {
            if merchant.chars().count() > 100 {
                return Err("merchant must be at most 100 characters");
            }
        }
        if let Some(reference) = &self.reference_number {
            let alnum = reference.chars().filter(|c| c.is_alphanumeric()).count();
            if alnum < 6 {
                return Err("reference number must have at least 6 alphanumeric characters");
            }
        }
        Ok(())
    }
}
