//! Status command - show store status and summary

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let status = ctx.status_service.get_status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Transaction Store Status".bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Total records", &status.total_records.to_string()]);
    table.add_row(vec!["From messages", &status.sms_records.to_string()]);
    table.add_row(vec!["Manual entries", &status.manual_records.to_string()]);
    table.add_row(vec!["Debits", &status.debit_records.to_string()]);
    table.add_row(vec!["Credits", &status.credit_records.to_string()]);
    println!("{}", table);

    if let (Some(earliest), Some(latest)) =
        (&status.date_range.earliest, &status.date_range.latest)
    {
        println!();
        println!("Date range: {} to {}", earliest, latest);
    }

    if ctx.config.demo_mode {
        println!();
        output::warning("Demo mode is ON - showing sample data. Run 'ct demo off' to leave.");
    }

    Ok(())
}
