//! Clear command - delete all stored records

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_context;
use crate::output;
use centime_core::ports::TransactionStore;

pub async fn run(force: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let count = ctx.store.record_count().await?;

    if count == 0 {
        if json {
            println!("{}", serde_json::json!({"deleted": 0}));
        } else {
            println!("Store is already empty.");
        }
        return Ok(());
    }

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete all {} records? This cannot be undone.", count))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Cancelled.".dimmed());
            return Ok(());
        }
    }

    let deleted = ctx.store.clear_records().await?;

    if json {
        println!("{}", serde_json::json!({"deleted": deleted}));
    } else {
        output::success(&format!("Deleted {} records", deleted));
    }

    Ok(())
}
