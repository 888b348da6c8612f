//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The core domain
//! depends only on these traits, not on concrete implementations.

mod message_source;
mod store;

pub use message_source::{FetchMessagesResult, MessageSource};
pub use store::TransactionStore;
