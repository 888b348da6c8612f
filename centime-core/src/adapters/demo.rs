//! Demo message source
//!
//! Generates 60 days of realistic bank-SMS traffic: salary, rent and
//! utility cycles, ATM withdrawals, UPI merchant spends, plus OTP and
//! promotional noise that the pipeline should reject. Fully
//! deterministic relative to the current date, so enabling demo mode
//! twice produces identical records after deduplication.

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use crate::domain::result::Result;
use crate::domain::RawMessage;
use crate::ports::{FetchMessagesResult, MessageSource};

const DEMO_DAYS: i64 = 60;

/// Simple deterministic random number generator (LCG)
/// Uses fixed seed for reproducibility
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> f64 {
        // Linear congruential generator
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 32) as f64 / u32::MAX as f64
    }

    /// Integer in `[low, high]`
    fn range(&mut self, low: i64, high: i64) -> i64 {
        low + (self.next() * (high - low + 1) as f64) as i64
    }
}

/// Generate the full demo message history ending today
pub fn generate_demo_messages() -> Vec<RawMessage> {
    let today = Utc::now().date_naive();
    let mut rng = SimpleRng::new(42); // Fixed seed for reproducibility
    let mut messages = Vec::new();

    let push = |messages: &mut Vec<RawMessage>,
                    days_ago: i64,
                    hour: u32,
                    sender: &str,
                    body: String| {
        let date = today - Duration::days(days_ago);
        if let Some(naive) = date.and_hms_opt(hour, 0, 0) {
            if let Some(received_at) = Utc.from_local_datetime(&naive).single() {
                messages.push(RawMessage::new(sender, body, received_at, true));
            }
        }
    };

    for days_ago in (0..DEMO_DAYS).rev() {
        let date = today - Duration::days(days_ago);
        let day_of_month = date.day();

        // Salary on the 1st
        if day_of_month == 1 {
            push(&mut messages, days_ago, 9, "AX-ICICIB", format!(
                "INR 85,000.00 credited to A/C XX4521. Salary for the month. Avl Bal Rs.1,12,340.50. Ref IC{}{}",
                date.format("%Y%m"), rng.range(100000, 999999),
            ));
        }

        // Rent on the 5th
        if day_of_month == 5 {
            push(&mut messages, days_ago, 10, "VM-HDFCBK", format!(
                "Rs.22,000.00 debited from A/C XX4521 towards rent payment. UPI ref {}. Avl Bal Rs.68,214.00",
                rng.range(400000000000i64, 499999999999i64),
            ));
        }

        // Electricity bill on the 10th
        if day_of_month == 10 {
            push(&mut messages, days_ago, 11, "VM-HDFCBK", format!(
                "Rs.{}.00 paid to BESCOM electricity via BillDesk from A/C XX4521. Ref BD{}",
                rng.range(1400, 2600), rng.range(10000000, 99999999),
            ));
        }

        // ATM withdrawal roughly weekly
        if days_ago % 7 == 2 {
            let amount = [2000, 3000, 5000, 2000, 4000][days_ago as usize % 5];
            push(&mut messages, days_ago, 18, "VM-HDFCBK", format!(
                "Rs.{}.00 withdrawn from A/C XX4521 at HDFC Bank ATM. Avl Bal Rs.{}.00. Ref AT{}",
                amount, rng.range(20000, 90000), rng.range(10000000, 99999999),
            ));
        }

        // UPI merchant spends most days
        if days_ago % 2 == 0 {
            let merchants: [(&str, i64, i64); 4] = [
                ("swiggy", 180, 620),
                ("zomato", 220, 540),
                ("bigbasket", 400, 1400),
                ("uber", 90, 380),
            ];
            let (merchant, low, high) = merchants[days_ago as usize % merchants.len()];
            push(&mut messages, days_ago, 13, "VM-HDFCBK", format!(
                "Rs.{}.00 debited from A/C XX4521 paid to {}@okhdfcbank via UPI. Ref {}",
                rng.range(low, high), merchant, rng.range(400000000000i64, 499999999999i64),
            ));
        }

        // Coffee every third day
        if days_ago % 3 == 1 {
            push(&mut messages, days_ago, 8, "AX-ICICIB", format!(
                "Rs.{}.00 spent on ICICI Card XX8832 at THIRD WAVE COFFEE on {}. Avl Lmt Rs.1,40,000",
                rng.range(160, 420), date.format("%d-%m-%y"),
            ));
        }

        // Fuel every ninth day
        if days_ago % 9 == 4 {
            push(&mut messages, days_ago, 19, "AX-ICICIB", format!(
                "Rs.{}.00 spent on ICICI Card XX8832 at INDIAN OIL PETROL on {}",
                rng.range(900, 2100), date.format("%d-%m-%y"),
            ));
        }

        // Noise the pipeline must reject: OTPs and promotions
        if days_ago % 5 == 3 {
            push(&mut messages, days_ago, 12, "VM-HDFCBK", format!(
                "Your OTP for net banking login is {}. Do not share it with anyone.",
                rng.range(100000, 999999),
            ));
        }
        if days_ago % 11 == 6 {
            push(
                &mut messages,
                days_ago,
                16,
                "VM-HDFCBK",
                "Get 5% cashback on grocery shopping with your HDFC card this weekend! T&C apply."
                    .to_string(),
            );
        }
    }

    messages
}

/// Demo message source
///
/// Implements MessageSource over the generated history.
pub struct DemoMessageSource;

impl DemoMessageSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DemoMessageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSource for DemoMessageSource {
    fn name(&self) -> &str {
        "demo"
    }

    fn fetch_messages(&self, since: Option<DateTime<Utc>>) -> Result<FetchMessagesResult> {
        let mut messages = generate_demo_messages();
        if let Some(since) = since {
            messages.retain(|m| m.received_at > since);
        }
        Ok(FetchMessagesResult {
            messages,
            warnings: Vec::new(),
        })
    }
}
