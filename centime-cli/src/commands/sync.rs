//! Sync command - pull messages from a registered source

use anyhow::Result;
use chrono::{TimeZone, Utc};
use colored::Colorize;

use super::get_context;

pub async fn run(source: Option<String>, show_status: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    if show_status {
        let status = ctx.ingest_service.sync_status().await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }
        println!("Synced records: {}", status.total_synced);
        match status.last_synced_at.and_then(|ms| Utc.timestamp_millis_opt(ms).single()) {
            Some(dt) => println!("Cursor: {}", dt.format("%Y-%m-%d")),
            None => println!("Cursor: none (nothing synced yet)"),
        }
        return Ok(());
    }

    let name = source.unwrap_or_else(|| "demo".to_string());
    let result = ctx.ingest_service.sync_from_source(&name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{} {}", "Synced:".green(), result.source);
    println!("  Messages fetched: {}", result.batch.received_count);
    println!("  New records: {}", result.batch.processed_count);
    println!(
        "  Skipped: {} filtered, {} duplicates",
        result.batch.failed_count, result.batch.duplicate_count
    );

    for warning in &result.warnings {
        println!("{} {}", "Warning:".yellow(), warning);
    }

    Ok(())
}
