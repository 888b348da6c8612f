//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or external
//! dependencies beyond hashing for the dedup fingerprint.

mod cash;
mod category;
mod message;
mod parsed;
mod transaction;
pub mod result;

pub use cash::{AmountRange, CashPosition, CashSummary, SpendSuggestion};
pub use category::Category;
pub use message::RawMessage;
pub use parsed::ParsedTransaction;
pub use transaction::{Direction, Source, TransactionRecord};
