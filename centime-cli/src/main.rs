//! Centime CLI - SMS transactions and cash reconciliation in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;
mod output;

use commands::{cash, clear, demo, import, logs, parse, quickadd, status, sync};

/// Centime - SMS transactions and cash reconciliation in your terminal
#[derive(Parser)]
#[command(name = "ct", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show store status and summary
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a single message without storing it
    Parse {
        /// Message body (reads stdin when omitted)
        body: Option<String>,
        /// Sender id to parse under
        #[arg(long, default_value = "VM-HDFCBK")]
        sender: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sync messages from a registered source
    Sync {
        /// Source name (defaults to the demo source)
        source: Option<String>,
        /// Show the sync cursor instead of syncing
        #[arg(long)]
        status: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Import messages from an exported-inbox CSV
    Import {
        /// Path to CSV file
        file: PathBuf,
        /// Parse without persisting
        #[arg(long)]
        preview: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the cash position and quick-add suggestions
    Cash {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log a cash expense
    Quickadd {
        /// Amount spent
        amount: Option<Decimal>,
        /// Subcategory (e.g. groceries, transport)
        subcategory: Option<String>,
        /// Free-form note
        #[arg(long)]
        description: Option<String>,
        /// Spend date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },

    /// Delete all stored records
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Status { .. } => "status",
            Commands::Parse { .. } => "parse",
            Commands::Sync { .. } => "sync",
            Commands::Import { .. } => "import",
            Commands::Cash { .. } => "cash",
            Commands::Quickadd { .. } => "quickadd",
            Commands::Demo { .. } => "demo",
            Commands::Logs { .. } => "logs",
            Commands::Clear { .. } => "clear",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let logger = commands::get_logger();
    commands::log_command(&logger, cli.command.name());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json).await,
        Commands::Parse { body, sender, json } => parse::run(&sender, body, json),
        Commands::Sync { source, status, json } => sync::run(source, status, json).await,
        Commands::Import { file, preview, json } => import::run(&file, preview, json).await,
        Commands::Cash { json } => cash::run(json).await,
        Commands::Quickadd {
            amount,
            subcategory,
            description,
            date,
            json,
        } => quickadd::run(amount, subcategory, description, date, json).await,
        Commands::Demo { command } => demo::run(command).await,
        Commands::Logs { command } => logs::run(command),
        Commands::Clear { force, json } => clear::run(force, json).await,
    }
}
