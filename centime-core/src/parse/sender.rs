//! Sender classifier
//!
//! Decides whether a sender id looks like a financial institution. The
//! result is a boolean OR over the sender pattern set, so no ordering
//! applies here. Deliberately high recall; §4.2-style body filtering
//! happens downstream.

use crate::parse::patterns::SENDER_PATTERNS;

/// True when the sender id matches any known financial pattern
pub fn is_financial_sender(sender: &str) -> bool {
    SENDER_PATTERNS.is_match(sender.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_brand_senders() {
        assert!(is_financial_sender("VM-HDFCBK"));
        assert!(is_financial_sender("AX-ICICIB"));
        assert!(is_financial_sender("SBIUPI"));
        assert!(is_financial_sender("KOTAKB"));
    }

    #[test]
    fn test_payment_service_senders() {
        assert!(is_financial_sender("PAYTMB"));
        assert!(is_financial_sender("PhonePe"));
        assert!(is_financial_sender("GPAY"));
    }

    #[test]
    fn test_dlt_header_shape() {
        // Two letters, hyphen, brand code - even for an unknown brand.
        assert!(is_financial_sender("VM-ZXQBNK"));
        assert!(!is_financial_sender("VM-ZXQBNK extra text"));
    }

    #[test]
    fn test_non_financial_senders() {
        assert!(!is_financial_sender("Mom"));
        assert!(!is_financial_sender("+919812345678"));
        assert!(!is_financial_sender("PIZZAHUT"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(is_financial_sender("hdfcbk"));
        assert!(is_financial_sender("Hdfc Bank"));
    }
}
