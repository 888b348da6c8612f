//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_centime_dir;
use centime_core::services::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode and seed the sample inbox
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub async fn run(command: Option<DemoCommands>) -> Result<()> {
    let centime_dir = get_centime_dir();
    std::fs::create_dir_all(&centime_dir)?;
    let demo_service = DemoService::new(&centime_dir);

    match command {
        Some(DemoCommands::On) => {
            let seeded = demo_service.enable().await?;
            println!("{}", "Demo mode enabled".green());
            println!(
                "Seeded {} records from {} sample messages ({} filtered as noise).",
                seeded.records_created, seeded.messages_generated, seeded.noise_filtered
            );
            println!("Run 'ct status' or 'ct cash' to explore the demo data.");
            Ok(())
        }
        Some(DemoCommands::Off) => {
            demo_service.disable(false)?; // Keep demo data around by default
            println!("{}", "Demo mode disabled".yellow());
            Ok(())
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
            Ok(())
        }
    }
}
