//! Integration tests for the message parsing pipeline
//!
//! These run the full sender -> filter -> extract -> categorize chain
//! over realistic message bodies and pin the contract behaviors.
//!
//! Run with: cargo test --test pipeline_tests -- --nocapture

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use centime_core::domain::{Category, Direction, RawMessage};
use centime_core::parse::parse_message;

// ============================================================================
// Test Helpers
// ============================================================================

fn message(sender: &str, body: &str) -> RawMessage {
    let received_at = Utc.with_ymd_and_hms(2025, 3, 10, 14, 30, 0).unwrap();
    RawMessage::new(sender, body, received_at, false)
}

fn parse(sender: &str, body: &str) -> centime_core::ParsedTransaction {
    parse_message(&message(sender, body))
}

// ============================================================================
// Financial gate
// ============================================================================

#[test]
fn test_non_financial_messages_produce_nothing() {
    let cases = [
        ("Mom", "dinner at 8?"),
        ("+919812345678", "Rs.500 debited from A/C XX1234"), // personal number
        ("VM-HDFCBK", "Welcome to mobile banking! Download our app today."),
        ("AMZNIN", "Your package has shipped and arrives tomorrow."),
    ];

    for (sender, body) in cases {
        let parsed = parse(sender, body);
        assert!(!parsed.is_financial, "should reject: {} / {}", sender, body);
        assert!(!parsed.is_actionable());
    }
}

#[test]
fn test_otp_veto_wins_regardless_of_amount() {
    let parsed = parse("VM-HDFCBK", "Your OTP is 4532 for Rs.500 txn. Do not share.");
    assert!(!parsed.is_financial, "OTP veto must override amount and keyword");

    let parsed = parse(
        "AX-ICICIB",
        "Use verification code is 887766 to confirm payment of Rs.1200",
    );
    assert!(!parsed.is_financial);
}

#[test]
fn test_amount_is_mandatory_for_actionability() {
    // Keyword present, no parseable amount.
    let parsed = parse("VM-HDFCBK", "Your card payment was debited successfully.");
    assert!(!parsed.is_actionable());
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_amount_extraction_is_deterministic() {
    let parsed = parse("VM-HDFCBK", "Rs. 1,200.50 debited from A/C XX1234");
    assert!(parsed.is_financial);
    assert_eq!(parsed.amount, Some("1200.50".parse().unwrap()));
    assert_eq!(parsed.account_suffix.as_deref(), Some("1234"));
}

#[test]
fn test_debit_wins_on_refund_style_bodies() {
    let parsed = parse(
        "VM-HDFCBK",
        "Refund credited: Rs.750 for the amount debited on 02-03-25",
    );
    assert_eq!(parsed.direction, Direction::Debit);
}

#[test]
fn test_credit_salary_message() {
    let parsed = parse(
        "AX-ICICIB",
        "INR 85,000.00 credited to A/C XX4521. Salary for Mar. Avl Bal Rs.1,12,340.50",
    );
    assert!(parsed.is_financial);
    assert_eq!(parsed.amount, Some(Decimal::from(85_000)));
    assert_eq!(parsed.direction, Direction::Credit);
    assert_eq!(parsed.category, Category::Income);
    assert_eq!(parsed.balance, Some("112340.50".parse().unwrap()));
}

// ============================================================================
// Categorization
// ============================================================================

#[test]
fn test_category_order_breaks_ties() {
    // Both bills and essentials vocabulary present; Bills is declared
    // earlier and must win.
    let both = parse(
        "VM-HDFCBK",
        "Rs.900 paid towards electricity and grocery shop dues",
    );
    assert_eq!(both.category, Category::Bills);

    // Drop the earlier-category keyword and the later one takes over.
    let only_later = parse("VM-HDFCBK", "Rs.900 paid towards grocery shop dues");
    assert_eq!(only_later.category, Category::Essentials);
}

#[test]
fn test_category_falls_back_by_direction() {
    let credit = parse("VM-HDFCBK", "Rs.400 credited to A/C XX1234");
    assert_eq!(credit.category, Category::Income);

    let debit = parse("VM-HDFCBK", "Rs.400 debited from card XX1234");
    assert_eq!(debit.category, Category::Spends);
}

// ============================================================================
// End to end
// ============================================================================

#[test]
fn test_full_hdfc_debit_message() {
    let parsed = parse(
        "VM-HDFCBK",
        "HDFC Bank: Rs.500 debited from A/C XX1234 at SWIGGY on 01-01-24. Avl Bal Rs.4500",
    );

    assert!(parsed.is_financial);
    assert!(parsed.is_actionable());
    assert_eq!(parsed.amount, Some(Decimal::from(500)));
    assert_eq!(parsed.direction, Direction::Debit);
    assert_eq!(parsed.merchant.as_deref(), Some("SWIGGY"));
    assert_eq!(parsed.account_suffix.as_deref(), Some("1234"));
    assert_eq!(parsed.bank_name.as_deref(), Some("HDFC Bank"));
    assert_eq!(parsed.balance, Some(Decimal::from(4500)));
}

#[test]
fn test_upi_vpa_message() {
    let parsed = parse(
        "VM-HDFCBK",
        "Rs.349.00 debited from A/C XX4521 paid to bigbasket@okhdfcbank via UPI. Ref 402918374651",
    );
    assert_eq!(parsed.amount, Some(Decimal::new(34_900, 2)));
    assert_eq!(parsed.merchant.as_deref(), Some("bigbasket@okhdfcbank"));
    assert_eq!(parsed.reference_number.as_deref(), Some("402918374651"));
    assert_eq!(parsed.category, Category::Essentials, "merchant keyword match");
}

#[test]
fn test_parsing_is_pure() {
    let msg = message(
        "VM-HDFCBK",
        "HDFC Bank: Rs.500 debited from A/C XX1234 at SWIGGY on 01-01-24. Avl Bal Rs.4500",
    );
    let runs: Vec<_> = (0..3).map(|_| parse_message(&msg)).collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}
