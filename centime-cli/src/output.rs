//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format a money amount with the rupee sign
pub fn format_amount(amount: Decimal) -> String {
    format!("\u{20b9}{}", amount.round_dp(2))
}

/// Format a ratio as a percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
