//! Parse command - run the pipeline over one message without storing it

use std::io::Read;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use centime_core::{parse_message, RawMessage};

use crate::output;

pub fn run(sender: &str, body: Option<String>, json: bool) -> Result<()> {
    let body = match body {
        Some(body) => body,
        None => {
            if atty::is(atty::Stream::Stdin) {
                anyhow::bail!("No message body given. Pass it as an argument or pipe it on stdin.");
            }
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer.trim().to_string()
        }
    };
    if body.is_empty() {
        anyhow::bail!("Message body is empty");
    }

    let message = RawMessage::new(sender, body, Utc::now(), false);
    let parsed = parse_message(&message);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(());
    }

    if !parsed.is_financial {
        output::warning("Not a financial message (sender or content gate rejected it).");
        return Ok(());
    }

    let mut table = output::create_table();
    let amount = parsed
        .amount
        .map(output::format_amount)
        .unwrap_or_else(|| "-".to_string());
    table.add_row(vec!["Amount", &amount]);
    table.add_row(vec!["Direction", parsed.direction.as_str()]);
    table.add_row(vec!["Category", parsed.category.as_str()]);
    table.add_row(vec!["Merchant", parsed.merchant.as_deref().unwrap_or("-")]);
    table.add_row(vec![
        "Account",
        &parsed
            .account_suffix
            .as_deref()
            .map(|s| format!("XX{}", s))
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec!["Bank", parsed.bank_name.as_deref().unwrap_or("-")]);
    let balance = parsed
        .balance
        .map(output::format_amount)
        .unwrap_or_else(|| "-".to_string());
    table.add_row(vec!["Balance", &balance]);
    table.add_row(vec![
        "Reference",
        parsed.reference_number.as_deref().unwrap_or("-"),
    ]);
    println!("{}", table);

    if parsed.is_actionable() {
        output::success("Actionable: this message would create a record.");
    } else {
        println!(
            "{}",
            "Financial, but no amount was extracted - it would be skipped.".yellow()
        );
    }

    Ok(())
}
