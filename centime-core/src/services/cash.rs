//! Cash service - reconcile withdrawals against logged cash spends
//!
//! Pure read/compute over persisted records plus the quick-add write
//! path. Aggregation and ranking live in free functions so they test
//! without a store; the service wires them to storage and settings.

use std::sync::Arc;

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::config::CashSettings;
use crate::domain::{
    AmountRange, CashPosition, CashSummary, Category, Source, SpendSuggestion, TransactionRecord,
};
use crate::ports::TransactionStore;
use crate::stats::{percentile, weekday_weight};

/// Keyword fallbacks for records ingested before tagging existed
const WITHDRAWAL_KEYWORDS: [&str; 5] = [
    "atm",
    "cash withdrawal",
    "withdrawal",
    "withdraw",
    "cash withdraw",
];

/// A debit record counts as a cash withdrawal when tagged, or when its
/// description/merchant carries withdrawal vocabulary
pub fn is_withdrawal_event(record: &TransactionRecord) -> bool {
    if !record.is_debit() {
        return false;
    }
    if record.has_tag("cash_withdrawal") {
        return true;
    }
    let mut text = record.description.clone().unwrap_or_default();
    if let Some(merchant) = &record.merchant {
        text.push(' ');
        text.push_str(merchant);
    }
    let text = text.to_lowercase();
    WITHDRAWAL_KEYWORDS.iter().any(|k| text.contains(k))
}

/// A debit record counts as a tracked cash spend when tagged `cash` or
/// `cash_spend`, or when "cash" appears in its description/subcategory.
/// Withdrawals themselves are excluded - moving cash out of the account
/// is not spending it.
pub fn is_cash_spend_event(record: &TransactionRecord) -> bool {
    if !record.is_debit() || is_withdrawal_event(record) {
        return false;
    }
    if record.has_tag("cash") || record.has_tag("cash_spend") {
        return true;
    }
    let description = record.description.as_deref().unwrap_or_default().to_lowercase();
    let subcategory = record.subcategory.as_deref().unwrap_or_default().to_lowercase();
    description.contains("cash") || subcategory.contains("cash")
}

/// Aggregate a record history into a cash position as of `today`
pub fn compute_position(
    records: &[TransactionRecord],
    today: NaiveDate,
    window_days: u32,
    min_days_since_withdrawal: i64,
) -> CashPosition {
    let window_start = today - Duration::days(window_days as i64);

    let mut total_withdrawn = Decimal::ZERO;
    let mut tracked_cash_spend = Decimal::ZERO;
    let mut last_withdrawal_date: Option<NaiveDate> = None;

    for record in records {
        if is_withdrawal_event(record) {
            // The last-withdrawal marker looks at full history, not
            // just the window, so the nudge timer survives window
            // boundaries.
            if last_withdrawal_date.map_or(true, |d| record.transaction_date > d) {
                last_withdrawal_date = Some(record.transaction_date);
            }
            if record.transaction_date >= window_start && record.transaction_date <= today {
                total_withdrawn += record.amount;
            }
        } else if is_cash_spend_event(record)
            && record.transaction_date >= window_start
            && record.transaction_date <= today
        {
            tracked_cash_spend += record.amount;
        }
    }

    let estimated_untracked = total_withdrawn - tracked_cash_spend;
    let days_since_last_withdrawal =
        last_withdrawal_date.map(|d| (today - d).num_days());

    // Zero withdrawals must never divide.
    let tracking_ratio = if total_withdrawn > Decimal::ZERO {
        let ratio = (tracked_cash_spend / total_withdrawn)
            .to_f64()
            .unwrap_or(0.0);
        ratio.min(1.0)
    } else {
        0.0
    };

    let eligible_for_nudge = estimated_untracked > Decimal::ZERO
        && days_since_last_withdrawal
            .is_some_and(|days| days >= min_days_since_withdrawal);

    CashPosition {
        window_days,
        total_withdrawn,
        tracked_cash_spend,
        estimated_untracked,
        last_withdrawal_date,
        days_since_last_withdrawal,
        tracking_ratio,
        eligible_for_nudge,
    }
}

/// Rank historical cash-spend subcategories into quick-add suggestions.
///
/// Events on today's weekday weigh x1.6; probability is over all
/// groups, not just the returned top slice, and is never renormalized
/// after truncation.
pub fn rank_suggestions(
    records: &[TransactionRecord],
    today: NaiveDate,
    history_days: u32,
    limit: usize,
) -> Vec<SpendSuggestion> {
    let history_start = today - Duration::days(history_days as i64);
    let target_weekday = today.weekday();

    struct Group {
        subcategory: String,
        weighted_count: f64,
        amounts: Vec<Decimal>,
    }

    // First-seen order is the stable tie-break for equal scores.
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        if !is_cash_spend_event(record) {
            continue;
        }
        if record.transaction_date < history_start || record.transaction_date > today {
            continue;
        }

        let subcategory = record
            .subcategory
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "other".to_string());
        let weight = weekday_weight(record.transaction_date.weekday(), target_weekday);

        match groups.iter_mut().find(|g| g.subcategory == subcategory) {
            Some(group) => {
                group.weighted_count += weight;
                group.amounts.push(record.amount);
            }
            None => groups.push(Group {
                subcategory,
                weighted_count: weight,
                amounts: vec![record.amount],
            }),
        }
    }

    if groups.is_empty() {
        return Vec::new();
    }

    let total_weight: f64 = groups.iter().map(|g| g.weighted_count).sum();

    let mut suggestions: Vec<SpendSuggestion> = groups
        .into_iter()
        .filter_map(|group| {
            let typical = percentile(&group.amounts, 0.50)?;
            let low = percentile(&group.amounts, 0.25)?;
            let high = percentile(&group.amounts, 0.75)?;
            Some(SpendSuggestion {
                label: suggestion_label(&group.subcategory),
                subcategory: group.subcategory,
                typical_amount: typical,
                amount_range: AmountRange { low, high },
                probability: group.weighted_count / total_weight,
            })
        })
        .collect();

    // Stable sort keeps first-seen order on ties.
    suggestions.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    suggestions.truncate(limit);
    suggestions
}

/// Human-readable label for a subcategory: underscores to spaces, each
/// word Title-Cased (`street_food` -> `Street Food`)
pub fn suggestion_label(subcategory: &str) -> String {
    subcategory
        .split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Category for a quick-added cash expense, from its subcategory
pub fn quick_add_category(subcategory: &str) -> Category {
    let s = subcategory.trim().to_lowercase();
    let matches = |terms: &[&str]| terms.iter().any(|t| s.contains(t));

    if matches(&["groceries", "grocery", "food", "dining", "restaurant", "cafe"]) {
        Category::Essentials
    } else if matches(&["transport", "fuel", "parking", "taxi", "uber", "auto"]) {
        Category::Needs
    } else if matches(&["shopping", "clothing", "entertainment", "movie", "games"]) {
        Category::Spends
    } else if matches(&["bills", "utilities", "rent", "electricity", "water"]) {
        Category::Bills
    } else {
        Category::Other
    }
}

/// Cash service: position, suggestions, summary, quick-add
pub struct CashService {
    store: Arc<dyn TransactionStore>,
    settings: CashSettings,
}

impl CashService {
    pub fn new(store: Arc<dyn TransactionStore>, settings: CashSettings) -> Self {
        Self { store, settings }
    }

    pub async fn position(&self) -> Result<CashPosition> {
        let records = self.store.get_records().await?;
        Ok(compute_position(
            &records,
            Utc::now().date_naive(),
            self.settings.window_days,
            self.settings.min_days_since_withdrawal,
        ))
    }

    pub async fn suggestions(&self) -> Result<Vec<SpendSuggestion>> {
        let records = self.store.get_records().await?;
        Ok(rank_suggestions(
            &records,
            Utc::now().date_naive(),
            self.settings.history_days,
            self.settings.suggestion_limit,
        ))
    }

    /// The UI-facing summary: position plus ranked suggestions, with
    /// probabilities rounded at this edge
    pub async fn summary(&self) -> Result<CashSummary> {
        let records = self.store.get_records().await?;
        let today = Utc::now().date_naive();
        let position = compute_position(
            &records,
            today,
            self.settings.window_days,
            self.settings.min_days_since_withdrawal,
        );
        let suggestions = rank_suggestions(
            &records,
            today,
            self.settings.history_days,
            self.settings.suggestion_limit,
        );
        Ok(CashSummary::new(position, suggestions))
    }

    /// Log a cash expense - the correction loop that shrinks the
    /// untracked estimate
    pub async fn quick_add(
        &self,
        amount: Decimal,
        subcategory: &str,
        description: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<TransactionRecord> {
        if amount <= Decimal::ZERO {
            anyhow::bail!("Amount must be positive");
        }
        let subcategory = subcategory.trim().to_lowercase();
        if subcategory.is_empty() {
            anyhow::bail!("Subcategory must not be empty");
        }

        let mut record = TransactionRecord::new(
            amount,
            crate::domain::Direction::Debit,
            quick_add_category(&subcategory),
            date.unwrap_or_else(|| Utc::now().date_naive()),
            Source::Manual,
        );
        record.subcategory = Some(subcategory.clone());
        record.tags = vec!["cash".to_string(), "cash_spend".to_string()];
        record.description = Some(
            description
                .map(str::to_string)
                .unwrap_or_else(|| format!("Cash - {}", subcategory)),
        );

        self.store.add_record(&record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn withdrawal(amount: i64, on: NaiveDate) -> TransactionRecord {
        let mut r = TransactionRecord::new(
            Decimal::from(amount),
            Direction::Debit,
            Category::Spends,
            on,
            Source::Sms,
        );
        r.description = Some("Rs withdrawn at HDFC Bank ATM".to_string());
        r
    }

    fn cash_spend(amount: i64, subcategory: &str, on: NaiveDate) -> TransactionRecord {
        let mut r = TransactionRecord::new(
            Decimal::from(amount),
            Direction::Debit,
            quick_add_category(subcategory),
            on,
            Source::Manual,
        );
        r.subcategory = Some(subcategory.to_string());
        r.tags = vec!["cash".to_string(), "cash_spend".to_string()];
        r
    }

    #[test]
    fn test_event_classification() {
        let today = date(2025, 3, 10);
        let w = withdrawal(2000, today);
        assert!(is_withdrawal_event(&w));
        assert!(!is_cash_spend_event(&w), "withdrawal is not a spend");

        let s = cash_spend(300, "groceries", today);
        assert!(is_cash_spend_event(&s));
        assert!(!is_withdrawal_event(&s));

        // Credit records never participate.
        let mut refund = cash_spend(300, "groceries", today);
        refund.direction = Direction::Credit;
        assert!(!is_cash_spend_event(&refund));

        // Tagged withdrawal without keyword text.
        let mut tagged = cash_spend(500, "misc", today);
        tagged.description = Some("weekly money".to_string());
        tagged.subcategory = None;
        tagged.tags = vec!["cash_withdrawal".to_string()];
        assert!(is_withdrawal_event(&tagged));
    }

    #[test]
    fn test_position_arithmetic() {
        let today = date(2025, 3, 10);
        let records = vec![
            withdrawal(10_000, date(2025, 3, 1)),
            cash_spend(2_000, "groceries", date(2025, 3, 5)),
        ];

        let position = compute_position(&records, today, 30, 3);
        assert_eq!(position.total_withdrawn, Decimal::from(10_000));
        assert_eq!(position.tracked_cash_spend, Decimal::from(2_000));
        assert_eq!(position.estimated_untracked, Decimal::from(8_000));
        assert_eq!(position.days_since_last_withdrawal, Some(9));
        assert_eq!(position.last_withdrawal_date, Some(date(2025, 3, 1)));
        assert!((position.tracking_ratio - 0.2).abs() < 1e-9);
        assert!(position.eligible_for_nudge);
    }

    #[test]
    fn test_zero_withdrawals_never_divide() {
        let today = date(2025, 3, 10);
        let records = vec![cash_spend(500, "groceries", date(2025, 3, 5))];

        let position = compute_position(&records, today, 30, 3);
        assert_eq!(position.total_withdrawn, Decimal::ZERO);
        assert_eq!(position.tracking_ratio, 0.0);
        assert_eq!(position.estimated_untracked, Decimal::from(-500));
        assert!(!position.eligible_for_nudge, "negative untracked never nudges");
        assert_eq!(position.days_since_last_withdrawal, None);
    }

    #[test]
    fn test_nudge_needs_both_conditions() {
        let today = date(2025, 3, 10);

        // Untracked positive but withdrawal too recent.
        let recent = vec![withdrawal(5_000, date(2025, 3, 9))];
        let position = compute_position(&recent, today, 30, 3);
        assert!(position.estimated_untracked > Decimal::ZERO);
        assert!(!position.eligible_for_nudge);

        // Old enough withdrawal, untracked positive.
        let old = vec![withdrawal(5_000, date(2025, 3, 1))];
        assert!(compute_position(&old, today, 30, 3).eligible_for_nudge);
    }

    #[test]
    fn test_window_excludes_old_records() {
        let today = date(2025, 3, 10);
        let records = vec![
            withdrawal(10_000, date(2024, 12, 1)), // outside the window
            withdrawal(2_000, date(2025, 3, 1)),
        ];

        let position = compute_position(&records, today, 30, 3);
        assert_eq!(position.total_withdrawn, Decimal::from(2_000));
        // The nudge timer still sees the latest withdrawal overall.
        assert_eq!(position.last_withdrawal_date, Some(date(2025, 3, 1)));
    }

    #[test]
    fn test_suggestion_ranking_fixture() {
        // Monday target; groceries entries on Mondays, transport not.
        let today = date(2025, 3, 10);
        assert_eq!(today.weekday(), chrono::Weekday::Mon);

        let records = vec![
            cash_spend(400, "groceries", date(2025, 2, 24)),
            cash_spend(500, "groceries", date(2025, 3, 3)),
            cash_spend(600, "groceries", date(2025, 2, 17)),
            cash_spend(200, "transport", date(2025, 3, 5)),
        ];

        let suggestions = rank_suggestions(&records, today, 90, 4);
        assert_eq!(suggestions.len(), 2);

        let groceries = &suggestions[0];
        assert_eq!(groceries.subcategory, "groceries");
        assert_eq!(groceries.label, "Groceries");
        assert_eq!(groceries.typical_amount, Decimal::from(500));
        assert_eq!(groceries.amount_range.low, Decimal::from(400));
        assert_eq!(groceries.amount_range.high, Decimal::from(600));

        let transport = &suggestions[1];
        assert!(groceries.probability > transport.probability);

        // Denominator covers all groups: 3 * 1.6 = 4.8 vs 1.0.
        assert!((groceries.probability - 4.8 / 5.8).abs() < 1e-9);
        assert!((transport.probability - 1.0 / 5.8).abs() < 1e-9);
    }

    #[test]
    fn test_probabilities_not_renormalized_after_truncation() {
        let today = date(2025, 3, 10);
        let records: Vec<TransactionRecord> = ["a", "b", "c", "d", "e"]
            .iter()
            .enumerate()
            .map(|(i, sub)| cash_spend(100 + i as i64, sub, date(2025, 3, 4)))
            .collect();

        let suggestions = rank_suggestions(&records, today, 90, 4);
        assert_eq!(suggestions.len(), 4, "top 4 of 5 groups");
        let sum: f64 = suggestions.iter().map(|s| s.probability).sum();
        assert!(sum < 1.0, "trimmed group keeps its probability mass");
    }

    #[test]
    fn test_empty_history_means_no_suggestions() {
        let suggestions = rank_suggestions(&[], date(2025, 3, 10), 90, 4);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_suggestion_label() {
        assert_eq!(suggestion_label("street_food"), "Street Food");
        assert_eq!(suggestion_label("groceries"), "Groceries");
        assert_eq!(suggestion_label("other"), "Other");
    }

    #[test]
    fn test_quick_add_category_mapping() {
        assert_eq!(quick_add_category("groceries"), Category::Essentials);
        assert_eq!(quick_add_category("auto fare"), Category::Needs);
        assert_eq!(quick_add_category("movie"), Category::Spends);
        assert_eq!(quick_add_category("electricity"), Category::Bills);
        assert_eq!(quick_add_category("gifts"), Category::Other);
    }

    #[tokio::test]
    async fn test_quick_add_reduces_untracked() {
        use crate::adapters::InMemoryStore;

        let store = Arc::new(InMemoryStore::new());
        let svc = CashService::new(store.clone(), CashSettings::default());

        let today = Utc::now().date_naive();
        store
            .add_record(&withdrawal(5_000, today - Duration::days(5)))
            .await
            .unwrap();

        let before = svc.position().await.unwrap();
        assert_eq!(before.estimated_untracked, Decimal::from(5_000));

        let record = svc
            .quick_add(Decimal::from(800), "Groceries", None, None)
            .await
            .unwrap();
        assert_eq!(record.subcategory.as_deref(), Some("groceries"));
        assert_eq!(record.description.as_deref(), Some("Cash - groceries"));
        assert!(record.has_tag("cash") && record.has_tag("cash_spend"));
        assert_eq!(record.source, Source::Manual);

        let after = svc.position().await.unwrap();
        assert_eq!(after.estimated_untracked, Decimal::from(4_200));

        // Rejects garbage input.
        assert!(svc.quick_add(Decimal::ZERO, "x", None, None).await.is_err());
        assert!(svc
            .quick_add(Decimal::from(10), "   ", None, None)
            .await
            .is_err());
    }
}
