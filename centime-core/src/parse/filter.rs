//! Financial message filter
//!
//! `is_financial = has_transaction_keyword AND has_amount_pattern AND
//! NOT is_otp_like`. Requiring both a verb-class keyword and a
//! parseable amount suppresses purely promotional bank messages; the
//! OTP veto overrides everything else.

use crate::parse::patterns::{AMOUNT_PATTERNS, CREDIT_KEYWORDS, DEBIT_KEYWORDS, OTP_KEYWORDS};

/// Body contains at least one debit- or credit-class keyword
pub fn has_transaction_keyword(body: &str) -> bool {
    let body = body.to_lowercase();
    DEBIT_KEYWORDS.iter().any(|k| body.contains(k))
        || CREDIT_KEYWORDS.iter().any(|k| body.contains(k))
}

/// At least one of the four amount patterns matches
pub fn has_amount_pattern(body: &str) -> bool {
    AMOUNT_PATTERNS.iter().any(|p| p.is_match(body))
}

/// Body contains an OTP-veto keyword
pub fn is_otp_like(body: &str) -> bool {
    let body = body.to_lowercase();
    OTP_KEYWORDS.iter().any(|k| body.contains(k))
}

/// Full transaction-vs-noise decision for a message body
pub fn is_financial_message(body: &str) -> bool {
    !is_otp_like(body) && has_transaction_keyword(body) && has_amount_pattern(body)
}
