//! Spend category taxonomy
//!
//! The declaration order is load-bearing: the categorizer walks `ALL` in
//! this exact order and the first keyword hit wins, so reordering variants
//! changes classification results. Tests pin the order.

use serde::{Deserialize, Serialize};

/// Fixed spend-category taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bills,
    Essentials,
    Spends,
    Investments,
    Income,
    Transfer,
    Savings,
    Needs,
    Other,
}

impl Category {
    /// All categories in matching-priority order
    pub const ALL: [Category; 9] = [
        Category::Bills,
        Category::Essentials,
        Category::Spends,
        Category::Investments,
        Category::Income,
        Category::Transfer,
        Category::Savings,
        Category::Needs,
        Category::Other,
    ];

    /// Keywords bound to this category, matched as substrings against the
    /// lower-cased body and merchant. `Other` carries no keywords and is
    /// only reachable through manual entry.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Bills => &[
                "electricity",
                "broadband",
                "internet",
                "dth",
                "recharge",
                "postpaid",
                "landline",
                "water bill",
                "gas bill",
                "utility",
                "emi",
                "insurance premium",
                "bill payment",
                "billdesk",
                "municipal",
            ],
            Category::Essentials => &[
                "grocery",
                "groceries",
                "supermarket",
                "bigbasket",
                "dmart",
                "blinkit",
                "zepto",
                "vegetables",
                "milk",
                "pharmacy",
                "medical",
                "chemist",
                "provisions",
                "kirana",
            ],
            Category::Spends => &[
                "restaurant",
                "cafe",
                "coffee",
                "swiggy",
                "zomato",
                "dining",
                "food order",
                "movie",
                "entertainment",
                "shopping",
                "amazon",
                "flipkart",
                "myntra",
                "mall",
                "subscription",
            ],
            Category::Investments => &[
                "mutual fund",
                "sip",
                "zerodha",
                "groww",
                "upstox",
                "demat",
                "stock",
                "shares",
                "etf",
                "nps",
                "gold bond",
                "trading",
            ],
            Category::Income => &[
                "salary",
                "cashback",
                "refund",
                "dividend",
                "interest credited",
                "bonus",
                "stipend",
                "commission",
                "payout",
                "reimbursement",
            ],
            Category::Transfer => &[
                "neft",
                "imps",
                "rtgs",
                "upi transfer",
                "fund transfer",
                "transferred to",
                "self transfer",
                "beneficiary",
                "remittance",
                "money transfer",
            ],
            Category::Savings => &[
                "fixed deposit",
                "fd booked",
                "recurring deposit",
                "rd installment",
                "ppf",
                "sukanya",
                "nsc",
                "term deposit",
                "post office deposit",
                "savings scheme",
            ],
            Category::Needs => &[
                "fuel",
                "petrol",
                "diesel",
                "uber",
                "ola",
                "rapido",
                "metro",
                "irctc",
                "toll",
                "fastag",
                "parking",
                "hospital",
                "clinic",
                "school fee",
                "rent",
            ],
            Category::Other => &[],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bills => "bills",
            Category::Essentials => "essentials",
            Category::Spends => "spends",
            Category::Investments => "investments",
            Category::Income => "income",
            Category::Transfer => "transfer",
            Category::Savings => "savings",
            Category::Needs => "needs",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
