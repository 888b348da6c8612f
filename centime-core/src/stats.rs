//! Small statistics helpers backing the suggestion ranker
//!
//! Percentile selection is nearest-rank over the sorted sample:
//! `index = round((n - 1) * p)` with ties-to-even rounding. Ranking
//! correctness depends entirely on these two functions, so they live
//! here rather than inlined in the service.

use chrono::Weekday;
use rust_decimal::Decimal;

/// Boost applied to events that fall on the same weekday as the target
/// date. Same-weekday history is a routine signal.
pub const ROUTINE_WEEKDAY_BOOST: f64 = 1.6;

/// Weight of one historical event relative to a target weekday
pub fn weekday_weight(event_weekday: Weekday, target_weekday: Weekday) -> f64 {
    if event_weekday == target_weekday {
        ROUTINE_WEEKDAY_BOOST
    } else {
        1.0
    }
}

/// Nearest-rank percentile of a sample. `p` is a fraction in `[0, 1]`.
///
/// The sample is sorted internally; callers pass it in any order.
/// Returns `None` for an empty sample instead of panicking - a
/// suggestion group with zero members is simply omitted upstream.
pub fn percentile(sample: &[Decimal], p: f64) -> Option<Decimal> {
    if sample.is_empty() {
        return None;
    }
    let mut sorted = sample.to_vec();
    sorted.sort();

    let n = sorted.len();
    if n == 1 {
        return Some(sorted[0]);
    }

    let index = ((n - 1) as f64 * p).round_ties_even() as usize;
    Some(sorted[index.min(n - 1)])
}
