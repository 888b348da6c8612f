//! Parsed transaction - the stateless output of the parsing pipeline

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::transaction::Direction;

/// Result of running the parsing pipeline over one message.
///
/// Never persisted directly. `amount` is the one mandatory field for
/// persistence; [`ParsedTransaction::is_actionable`] gates what the sync
/// layer may turn into a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    pub amount: Option<Decimal>,
    pub direction: Direction,
    pub merchant: Option<String>,
    pub account_suffix: Option<String>,
    pub bank_name: Option<String>,
    pub balance: Option<Decimal>,
    pub reference_number: Option<String>,
    pub category: Category,
    pub is_financial: bool,
}

impl ParsedTransaction {
    /// A parse result for a message that never reached field extraction
    pub fn non_financial() -> Self {
        Self {
            amount: None,
            direction: Direction::Debit,
            merchant: None,
            account_suffix: None,
            bank_name: None,
            balance: None,
            reference_number: None,
            category: Category::Other,
            is_financial: false,
        }
    }

    /// True when the sync layer may persist a record from this result
    pub fn is_actionable(&self) -> bool {
        self.is_financial && self.amount.is_some()
    }
}
