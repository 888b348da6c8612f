//! Cash command - show the cash position and quick-add suggestions

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let summary = ctx.cash_service.summary().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!(
        "{} (last {} days)",
        "Cash Position".bold(),
        summary.window_days
    );
    println!();

    let mut table = output::create_table();
    table.add_row(vec![
        "Withdrawn",
        &output::format_amount(summary.total_withdrawn),
    ]);
    table.add_row(vec![
        "Tracked cash spend",
        &output::format_amount(summary.tracked_cash_spend),
    ]);
    table.add_row(vec![
        "Estimated untracked",
        &output::format_amount(summary.estimated_untracked_cash),
    ]);
    table.add_row(vec![
        "Tracking ratio",
        &output::format_percent(summary.tracking_ratio),
    ]);
    if let Some(date) = summary.last_withdrawal_date {
        let days = summary
            .days_since_withdrawal
            .map(|d| format!(" ({} days ago)", d))
            .unwrap_or_default();
        table.add_row(vec!["Last withdrawal", &format!("{}{}", date, days)]);
    }
    println!("{}", table);

    if summary.eligible_for_nudge {
        println!();
        output::warning(&format!(
            "You likely have {} in unlogged cash. Use 'ct quickadd' to log spends.",
            output::format_amount(summary.estimated_untracked_cash)
        ));
    }

    if !summary.suggestions.is_empty() {
        println!();
        println!("{}", "Likely cash spends today".bold());
        let mut table = output::create_table();
        table.set_header(vec!["Suggestion", "Typical", "Range", "Likelihood"]);
        for suggestion in &summary.suggestions {
            table.add_row(vec![
                suggestion.label.clone(),
                output::format_amount(suggestion.typical_amount),
                format!(
                    "{} - {}",
                    output::format_amount(suggestion.amount_range.low),
                    output::format_amount(suggestion.amount_range.high)
                ),
                output::format_percent(suggestion.probability),
            ]);
        }
        println!("{}", table);
    }

    Ok(())
}
