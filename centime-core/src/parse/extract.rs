//! Field extractors
//!
//! Each extractor walks its ordered pattern family top to bottom and
//! the first successful (match + transform) wins. Extraction failures
//! yield `None`; nothing here ever errors on malformed input. Fields
//! are independent - one failing does not block the others.

use rust_decimal::Decimal;

use crate::domain::Direction;
use crate::parse::patterns::{
    ACCOUNT_PATTERNS, AMOUNT_PATTERNS, BALANCE_PATTERNS, BANK_NAMES, BANK_PREFIX_PATTERN,
    CREDIT_KEYWORDS, DEBIT_KEYWORDS, MERCHANT_PATTERNS, REFERENCE_PATTERNS,
};

/// Sanity ceiling for extracted amounts (10^8). Anything at or above
/// this is treated as a failed parse, not a transaction.
const AMOUNT_CEILING: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

const MERCHANT_MAX_CHARS: usize = 100;
const REFERENCE_MIN_ALNUM: usize = 6;

/// Parse a captured number after stripping thousands separators
fn parse_decimal(raw: &str) -> Option<Decimal> {
    raw.replace(',', "").parse().ok()
}

/// Transaction amount. First pattern whose capture parses to a positive
/// decimal below the sanity ceiling wins; a matching pattern with an
/// unparseable capture falls through to the next one.
pub fn extract_amount(body: &str) -> Option<Decimal> {
    for pattern in AMOUNT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            if let Some(amount) = parse_decimal(&captures[1]) {
                if amount > Decimal::ZERO && amount < AMOUNT_CEILING {
                    return Some(amount);
                }
            }
        }
    }
    None
}

/// Money flow direction. Debit keywords are checked first and win even
/// when credit terms also appear (a refund mentioning the original
/// debit classifies as debit); no keyword at all defaults to debit.
pub fn extract_direction(body: &str) -> Direction {
    let body = body.to_lowercase();
    if DEBIT_KEYWORDS.iter().any(|k| body.contains(k)) {
        Direction::Debit
    } else if CREDIT_KEYWORDS.iter().any(|k| body.contains(k)) {
        Direction::Credit
    } else {
        Direction::Debit
    }
}

/// Merchant name, whitespace-collapsed and truncated to 100 chars
pub fn extract_merchant(body: &str) -> Option<String> {
    for pattern in MERCHANT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            let cleaned = normalize_merchant(&captures[1]);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }
    None
}

fn normalize_merchant(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let trimmed = collapsed.trim_matches(|c: char| c == '.' || c == ',' || c == '-');
    trimmed.chars().take(MERCHANT_MAX_CHARS).collect()
}

/// Masked account suffix digits
pub fn extract_account_suffix(body: &str) -> Option<String> {
    for pattern in ACCOUNT_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            return Some(captures[1].to_string());
        }
    }
    None
}

/// Post-transaction balance
pub fn extract_balance(body: &str) -> Option<Decimal> {
    for pattern in BALANCE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            if let Some(balance) = parse_decimal(&captures[1]) {
                return Some(balance);
            }
        }
    }
    None
}

/// Bank reference number. Candidates need at least 6 alphanumeric
/// characters; shorter captures (stray digits after "ref") are dropped
/// and the next pattern gets a chance.
pub fn extract_reference(body: &str) -> Option<String> {
    for pattern in REFERENCE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(body) {
            let candidate = captures[1].to_string();
            let alnum = candidate.chars().filter(|c| c.is_alphanumeric()).count();
            if alnum >= REFERENCE_MIN_ALNUM {
                return Some(candidate);
            }
        }
    }
    None
}

/// Bank name from the body: leading "<name> Bank" prefix first, then
/// the known-institution table. The sender-id fallback happens at
/// persistence time, not here.
pub fn extract_bank_name(body: &str) -> Option<String> {
    if let Some(captures) = BANK_PREFIX_PATTERN.captures(body) {
        return Some(captures[1].to_string());
    }
    let body = body.to_lowercase();
    BANK_NAMES
        .iter()
        .find(|(needle, _)| body.contains(needle))
        .map(|(_, canonical)| canonical.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_is_deterministic() {
        assert_eq!(
            extract_amount("Rs. 1,200.50 debited from A/C XX1234"),
            Some("1200.50".parse().unwrap())
        );
    }

    #[test]
    fn test_amount_respects_ceiling() {
        // 10^8 and above is rejected as garbage.
        assert_eq!(extract_amount("Rs. 100,000,000 debited"), None);
        assert_eq!(
            extract_amount("Rs. 99,999,999 debited"),
            Some(Decimal::from(99_999_999))
        );
    }

    #[test]
    fn test_amount_absent_when_no_pattern_matches() {
        assert_eq!(extract_amount("debited without any figure"), None);
    }

    #[test]
    fn test_direction_debit_wins_over_credit() {
        // Refund-style body mentioning both classes. Debit keywords are
        // checked first by policy; changing this requires changing the
        // assertion deliberately.
        let body = "Refund of Rs.500 credited for the amount debited on 01-01";
        assert_eq!(extract_direction(body), Direction::Debit);
    }

    #[test]
    fn test_direction_credit_and_default() {
        assert_eq!(
            extract_direction("Rs.85,000 credited. Salary for Jan."),
            Direction::Credit
        );
        assert_eq!(extract_direction("no keywords here"), Direction::Debit);
    }

    #[test]
    fn test_merchant_prepositional() {
        assert_eq!(
            extract_merchant("Rs.500 debited from A/C XX1234 at SWIGGY on 01-01-24"),
            Some("SWIGGY".to_string())
        );
    }

    #[test]
    fn test_merchant_vpa_handle() {
        assert_eq!(
            extract_merchant("Rs.120 sent via UPI ref 12345 handle ravi.stores@okicici done"),
            Some("ravi.stores@okicici".to_string())
        );
    }

    #[test]
    fn test_merchant_truncated_to_100_chars() {
        let long_name = "A".repeat(150);
        let body = format!("Rs.10 paid to {} on 01-01", long_name);
        let merchant = extract_merchant(&body).unwrap();
        assert_eq!(merchant.chars().count(), 100);
    }

    #[test]
    fn test_account_suffix_first_match_wins() {
        // Both the a/c-labeled and the bare-mask pattern would match;
        // the a/c pattern is first.
        assert_eq!(
            extract_account_suffix("debited from A/C XX1234 and card XX9999"),
            Some("1234".to_string())
        );
        assert_eq!(
            extract_account_suffix("spent using card ending 5678"),
            Some("5678".to_string())
        );
    }

    #[test]
    fn test_balance() {
        assert_eq!(
            extract_balance("Avl Bal Rs.4,500.25 as of today"),
            Some("4500.25".parse().unwrap())
        );
        assert_eq!(extract_balance("no balance vocabulary"), None);
    }

    #[test]
    fn test_reference_rejects_short_candidates() {
        assert_eq!(extract_reference("Ref no. 123"), None);
        assert_eq!(
            extract_reference("Ref no. 40291837465 for your payment"),
            Some("40291837465".to_string())
        );
        assert_eq!(
            extract_reference("UTR AXIR52019384"),
            Some("AXIR52019384".to_string())
        );
    }

    #[test]
    fn test_bank_name_prefix_then_table() {
        assert_eq!(
            extract_bank_name("HDFC Bank: Rs.500 debited"),
            Some("HDFC Bank".to_string())
        );
        assert_eq!(
            extract_bank_name("Rs.500 debited via kotak netbanking"),
            Some("Kotak Mahindra Bank".to_string())
        );
        assert_eq!(extract_bank_name("Rs.500 debited"), None);
    }
}
