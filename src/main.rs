//! Shelf Reader - command-line front end
//!
//! Drives the storefront and reader screens from a terminal.

use shelf_reader::cli::{self, Command};
use shelf_reader::core::config::{CliArgs, Config};
use shelf_reader::{core, App};

use anyhow::Result;
use clap::Parser;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Load configuration (handles CLI args, env vars, and config file)
    let config = match Config::from_args(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print error to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Initialize logging system based on configuration
    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting Shelf Reader v{}", env!("CARGO_PKG_VERSION"));
    info!(
        backend = ?config.storage.backend,
        path = ?config.storage.database_path,
        "Storage configuration"
    );

    let app = App::bootstrap(config).await?;
    cli::run(&app, args.command.unwrap_or(Command::Home)).await?;

    Ok(())
}
