//! Keyword categorizer
//!
//! Categories are tried in the fixed `Category::ALL` order and the
//! first category with a keyword hit wins, so a body mentioning both
//! bills and groceries always lands on the earlier category. Keywords
//! are substring matches on the lowercased body and merchant.

use crate::domain::{Category, Direction};

/// Categorize a parsed message from its body, merchant and direction
pub fn categorize(body: &str, merchant: Option<&str>, direction: Direction) -> Category {
    let body = body.to_lowercase();
    let merchant = merchant.map(str::to_lowercase);

    for category in Category::ALL {
        let hit = category.keywords().iter().any(|keyword| {
            body.contains(keyword)
                || merchant
                    .as_deref()
                    .is_some_and(|m| m.contains(keyword))
        });
        if hit {
            return category;
        }
    }

    match direction {
        Direction::Credit => Category::Income,
        Direction::Debit => Category::Spends,
    }
}
