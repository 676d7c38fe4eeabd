mod config;
mod logging;
mod server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use inventory_service::InventoryModule;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "inventory-server")]
#[command(about = "Inventory management API server")]
#[command(version)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply database migrations and exit
    Migrate,

    /// Print the effective configuration with secrets masked
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            config.logging.init();
            tracing::info!(
                host = %config.server.host,
                port = config.server.port,
                "Starting inventory server"
            );

            let module = InventoryModule::init(&config.inventory).await?;
            server::serve(&config.server, module.router()).await
        }
        Command::Migrate => {
            config.logging.init();
            let db = InventoryModule::connect(&config.inventory.database).await?;
            InventoryModule::migrate(&db).await
        }
        Command::CheckConfig => {
            let shown = serde_json::to_string_pretty(&config.redacted())?;
            println!("{}", shown);
            Ok(())
        }
    }
}
