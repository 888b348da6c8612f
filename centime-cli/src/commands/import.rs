//! Import command - import messages from an exported-inbox CSV

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use super::get_context;

pub async fn run(file: &Path, preview: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    let spinner = if json {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        pb.set_message(format!("Importing {}...", file.display()));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = ctx.ingest_service.import_csv(file, preview).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if preview {
        println!("{}", "PREVIEW - nothing was saved".yellow());
        println!();
    }

    println!("Rows read: {}", result.rows_read);
    if result.skipped_rows > 0 {
        println!(
            "  Skipped: {} (missing sender, body or timestamp)",
            result.skipped_rows
        );
    }
    println!("Messages parsed: {}", result.batch.received_count);
    println!(
        "  {} {}",
        "Records created:".green(),
        result.batch.processed_count
    );
    println!("  Filtered out: {}", result.batch.failed_count);
    if result.batch.duplicate_count > 0 {
        println!("  Duplicates: {}", result.batch.duplicate_count);
    }

    Ok(())
}
