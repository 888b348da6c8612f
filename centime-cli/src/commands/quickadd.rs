//! Quickadd command - log a cash expense

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use rust_decimal::Decimal;

use super::get_context;
use crate::output;

pub async fn run(
    amount: Option<Decimal>,
    subcategory: Option<String>,
    description: Option<String>,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;

    // Missing arguments fall back to interactive prompts.
    let amount = match amount {
        Some(amount) => amount,
        None => Input::<Decimal>::new()
            .with_prompt("Amount")
            .interact_text()?,
    };
    let subcategory = match subcategory {
        Some(subcategory) => subcategory,
        None => Input::<String>::new()
            .with_prompt("Subcategory (e.g. groceries, transport)")
            .interact_text()?,
    };

    let record = ctx
        .cash_service
        .quick_add(amount, &subcategory, description.as_deref(), date)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    output::success(&format!(
        "Logged {} under {} ({})",
        output::format_amount(record.amount),
        record.subcategory.as_deref().unwrap_or("-"),
        record.category.as_str()
    ));

    let position = ctx.cash_service.position().await?;
    println!(
        "Estimated untracked cash is now {}",
        output::format_amount(position.estimated_untracked)
    );

    Ok(())
}
