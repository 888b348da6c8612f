//! Static pattern tables for the parsing pipeline
//!
//! Everything here is built once on first use and shared read-only
//! across threads. Ordering inside each table is part of the contract:
//! extractors walk their pattern list top to bottom and the first match
//! wins, so reordering changes results. Tests pin the table sizes and
//! the behavior of each family.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

fn regex(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("pattern table regex must be valid")
}

// === Sender classification ===

/// Sender patterns: bank brands, payment services, card networks and
/// generic terms, plus the regulated DLT header shape. Substring
/// semantics except the anchored header pattern. High recall is the
/// point; the message filter narrows further.
pub static SENDER_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSetBuilder::new([
        // Bank brands
        "hdfc", "icici", "sbi", "axis", "kotak", "pnb", "bob", "baroda", "canara", "union",
        "idfc", "indus", "yes ?bank", "federal", "rbl", "aubank", "citi", "hsbc", "scb", "dbs",
        "idbi", "boi", "centbk", "iob", "uco",
        // Payment services
        "paytm", "phonepe", "gpay", "google ?pay", "amazonpay", "amzn", "mobikwik", "freecharge",
        "bhim", "upi", "npci", "payzapp",
        // Card networks / generic
        "visa", "master ?card", "rupay", "amex", r"\bbank\b", r"\bcard\b",
        // DLT header shape, e.g. "VM-HDFCBK"
        r"^[a-z]{2}-[a-z0-9]{4,8}$",
    ])
    .case_insensitive(true)
    .build()
    .expect("sender pattern set must be valid")
});

// === Transaction keyword sets ===

/// Debit vocabulary. Checked before the credit set; any hit makes the
/// direction debit even when credit terms also appear.
pub const DEBIT_KEYWORDS: [&str; 25] = [
    "debited",
    "debit",
    "withdrawn",
    "withdrawal",
    "spent",
    "paid",
    "payment of",
    "purchase",
    "purchased",
    "sent to",
    "transferred to",
    "deducted",
    "emi",
    "auto-debit",
    "autopay",
    "standing instruction",
    "charged",
    "pos ",
    "swiped",
    "remitted",
    "money sent",
    "cash wdl",
    "atm wdl",
    "towards",
    "bill paid",
];

pub const CREDIT_KEYWORDS: [&str; 12] = [
    "credited",
    "credit",
    "received",
    "deposited",
    "refund",
    "refunded",
    "cashback",
    "salary",
    "reversal",
    "deposit",
    "rewarded",
    "interest earned",
];

/// OTP veto set. Any hit excludes the message outright, no matter what
/// else matched - security codes must never be read as amounts.
pub const OTP_KEYWORDS: [&str; 4] = ["otp", "verification", "one time password", "code is"];

// === Field extraction pattern families ===

const NUMBER: &str = r"(\d+(?:,\d+)*(?:\.\d+)?)";
const CURRENCY: &str = r"(?:rs\.?|inr|₹)";
const TXN_VERB: &str = r"(?:debited|credited|withdrawn|spent|paid|received|deposited|transferred|deducted)";

/// Amount patterns: currency-prefixed; amount-labeled; number before a
/// transaction verb; verb before a currency-prefixed number.
pub static AMOUNT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        regex(&format!(r"{CURRENCY}\s*{NUMBER}")),
        regex(&format!(r"(?:amount|amt)\s*[:\-]?\s*{CURRENCY}?\s*{NUMBER}")),
        regex(&format!(r"{NUMBER}\s+{TXN_VERB}")),
        regex(&format!(r"{TXN_VERB}\s+(?:by|with|of)?\s*{CURRENCY}\s*{NUMBER}")),
    ]
});

/// Merchant patterns: prepositional context, UPI/VPA handle, POS and
/// e-commerce context. Matched against the original-case body so the
/// captured name keeps its casing.
pub static MERCHANT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        regex(
            r"(?:\b(?:paid\s+to|sent\s+to|received\s+from|at|to|from)\b|@)\s+([a-z][a-z0-9&.\-_' ]*?)(?:\s+(?:on|ref|upi|via|avl|bal|info)\b|[.,;]|$)",
        ),
        regex(r"\b([a-z0-9][a-z0-9.\-_]+@[a-z][a-z0-9]+)\b"),
        regex(r"(?:pos|e-?com(?:merce)?)\s*(?:at|@|-)?\s*([a-z][a-z0-9&.\-_' ]{1,40})"),
    ]
});

/// Account suffix patterns: a/c-labeled masked number, bare mask run,
/// card-ending phrasing, from/to-account phrasing.
pub static ACCOUNT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        regex(r"(?:a/c|acct|account)\s*(?:no\.?)?\s*[:#]?\s*[x*]*(\d{3,6})"),
        regex(r"[x*]{2,}(\d{4})"),
        regex(r"card\s+(?:no\.?\s*)?ending\s*(?:in\s*)?[x*]*(\d{4})"),
        regex(r"(?:from|to)\s+(?:your\s+)?account\s+[x*]*(\d{3,6})"),
    ]
});

/// Balance patterns: balance vocabulary then currency, currency then
/// balance vocabulary.
pub static BALANCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        regex(&format!(
            r"(?:avl\.?\s*bal|available\s+bal(?:ance)?|bal(?:ance)?)\s*(?:is|:)?\s*{CURRENCY}?\s*{NUMBER}"
        )),
        regex(&format!(
            r"{CURRENCY}\s*{NUMBER}\s*(?:avl|available|bal|balance)"
        )),
    ]
});

/// Reference patterns: generic ref/txn vocabulary, interbank-rail
/// vocabulary, order/id vocabulary. Candidates shorter than 6
/// alphanumerics are rejected by the extractor.
pub static REFERENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        regex(r"\b(?:ref(?:erence)?|txn|transaction)\b\s*(?:no\.?|id|#)?\s*[:.\-]?\s*([a-z0-9]+)"),
        regex(r"\b(?:utr|imps|neft|rtgs|upi)\b\s*(?:ref|no\.?|id)?\s*[:.\-]?\s*([a-z0-9]+)"),
        regex(r"\b(?:order|id)\b\s*[:#]?\s*([a-z0-9]{6,})"),
    ]
});

/// Leading "<name> Bank"-style body prefix
pub static BANK_PREFIX_PATTERN: Lazy<Regex> =
    Lazy::new(|| regex(r"^\s*([a-z][a-z ]{1,30}bank)\b"));

/// Known-institution table: (lowercase needle, canonical display name).
/// Checked in order when the body carries no bank prefix.
pub const BANK_NAMES: [(&str, &str); 14] = [
    ("hdfc", "HDFC Bank"),
    ("icici", "ICICI Bank"),
    ("sbi", "SBI"),
    ("axis", "Axis Bank"),
    ("kotak", "Kotak Mahindra Bank"),
    ("idfc", "IDFC First Bank"),
    ("indusind", "IndusInd Bank"),
    ("yes bank", "Yes Bank"),
    ("federal", "Federal Bank"),
    ("canara", "Canara Bank"),
    ("pnb", "Punjab National Bank"),
    ("citi", "Citibank"),
    ("paytm", "Paytm Payments Bank"),
    ("airtel", "Airtel Payments Bank"),
];
