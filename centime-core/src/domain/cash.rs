//! Cash reconciliation result types
//!
//! All of these are derived on demand from persisted records and never
//! stored. `CashSummary` is the UI-facing contract and serializes in
//! camelCase; the other structs keep Rust field names for internal use.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Withdrawals vs. tracked cash spend over a reconciliation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashPosition {
    pub window_days: u32,
    pub total_withdrawn: Decimal,
    pub tracked_cash_spend: Decimal,
    /// Signed: negative when logged cash spend exceeds withdrawals
    pub estimated_untracked: Decimal,
    pub last_withdrawal_date: Option<NaiveDate>,
    pub days_since_last_withdrawal: Option<i64>,
    /// `tracked_cash_spend / total_withdrawn`, 0 when nothing was withdrawn
    pub tracking_ratio: f64,
    pub eligible_for_nudge: bool,
}

/// Robust amount band for a suggestion (P25..P75 of the sample)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub low: Decimal,
    pub high: Decimal,
}

/// One ranked quick-add suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendSuggestion {
    pub label: String,
    pub subcategory: String,
    pub typical_amount: Decimal,
    pub amount_range: AmountRange,
    pub probability: f64,
}

/// Cash summary read surface consumed by the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashSummary {
    pub estimated_untracked_cash: Decimal,
    pub total_withdrawn: Decimal,
    pub tracked_cash_spend: Decimal,
    pub days_since_withdrawal: Option<i64>,
    pub last_withdrawal_date: Option<NaiveDate>,
    pub tracking_ratio: f64,
    pub eligible_for_nudge: bool,
    pub window_days: u32,
    pub suggestions: Vec<SpendSuggestion>,
}

impl CashSummary {
    /// Assemble the summary from a position and ranked suggestions.
    /// Probabilities are rounded to two decimals at this edge only.
    pub fn new(position: CashPosition, suggestions: Vec<SpendSuggestion>) -> Self {
        let suggestions = suggestions
            .into_iter()
            .map(|s| SpendSuggestion {
                probability: (s.probability * 100.0).round() / 100.0,
                ..s
            })
            .collect();

        Self {
            estimated_untracked_cash: position.estimated_untracked,
            total_withdrawn: position.total_withdrawn,
            tracked_cash_spend: position.tracked_cash_spend,
            days_since_withdrawal: position.days_since_last_withdrawal,
            last_withdrawal_date: position.last_withdrawal_date,
            tracking_ratio: position.tracking_ratio,
            eligible_for_nudge: position.eligible_for_nudge,
            window_days: position.window_days,
            suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rounds_probabilities_at_the_edge() {
        let position = CashPosition {
            window_days: 30,
            total_withdrawn: Decimal::from(10_000),
            tracked_cash_spend: Decimal::from(2_000),
            estimated_untracked: Decimal::from(8_000),
            last_withdrawal_date: None,
            days_since_last_withdrawal: None,
            tracking_ratio: 0.2,
            eligible_for_nudge: false,
        };
        let suggestion = SpendSuggestion {
            label: "Groceries".to_string(),
            subcategory: "groceries".to_string(),
            typical_amount: Decimal::from(500),
            amount_range: AmountRange {
                low: Decimal::from(400),
                high: Decimal::from(600),
            },
            probability: 0.827586,
        };

        let summary = CashSummary::new(position, vec![suggestion]);
        assert_eq!(summary.suggestions[0].probability, 0.83);
        assert_eq!(summary.estimated_untracked_cash, Decimal::from(8_000));
    }

    #[test]
    fn test_summary_serializes_in_camel_case() {
        let position = CashPosition {
            window_days: 30,
            total_withdrawn: Decimal::ZERO,
            tracked_cash_spend: Decimal::ZERO,
            estimated_untracked: Decimal::ZERO,
            last_withdrawal_date: None,
            days_since_last_withdrawal: None,
            tracking_ratio: 0.0,
            eligible_for_nudge: false,
        };
        let json = serde_json::to_value(CashSummary::new(position, Vec::new())).unwrap();
        assert!(json.get("estimatedUntrackedCash").is_some());
        assert!(json.get("daysSinceWithdrawal").is_some());
        assert!(json.get("trackingRatio").is_some());
    }
}
