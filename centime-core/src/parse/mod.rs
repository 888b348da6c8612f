//! SMS parsing pipeline
//!
//! Stateless and deterministic: sender gate, financial filter, field
//! extraction, categorization. The same message always yields the same
//! [`ParsedTransaction`]. All tables live in [`patterns`] so ordering
//! is visible in one place.

pub mod categorize;
pub mod extract;
pub mod filter;
pub mod patterns;
pub mod sender;

pub use categorize::categorize;
pub use filter::is_financial_message;
pub use sender::is_financial_sender;

use crate::domain::{ParsedTransaction, RawMessage};

/// Run the full pipeline over one raw message.
///
/// Non-financial senders and bodies short-circuit to
/// [`ParsedTransaction::non_financial`] without field extraction.
pub fn parse_message(message: &RawMessage) -> ParsedTransaction {
    if !is_financial_sender(&message.sender) {
        return ParsedTransaction::non_financial();
    }
    if !is_financial_message(&message.body) {
        return ParsedTransaction::non_financial();
    }

    let body = &message.body;
    let merchant = extract::extract_merchant(body);
    let direction = extract::extract_direction(body);
    let category = categorize(body, merchant.as_deref(), direction);

    ParsedTransaction {
        amount: extract::extract_amount(body),
        direction,
        merchant,
        account_suffix: extract::extract_account_suffix(body),
        bank_name: extract::extract_bank_name(body),
        balance: extract::extract_balance(body),
        reference_number: extract::extract_reference(body),
        category,
        is_financial: true,
    }
}
