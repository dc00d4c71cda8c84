//! tickr
//!
//! Stock market data for AI agents, served over MCP on stdio.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tickr_cli::cli::{Args, Command, MarketCommand};
use tickr_cli::logging::init_logging;
use tickr_cli::{commands, config_handlers};
use tickr_core::{ConfigManager, TickrConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    match args.command {
        Command::Config { action } => {
            init_logging(args.verbose, "warn");
            config_handlers::handle_config_command(config_path, action)?;
        }
        Command::Market(command) => {
            let config = TickrConfig::load(config_path)?;
            init_logging(args.verbose, &config.logging.level);
            run(command, &config).await?;
        }
    }
    Ok(())
}

async fn run(command: MarketCommand, config: &TickrConfig) -> tickr_cli::Result<()> {
    match command {
        MarketCommand::Serve { fixtures } => {
            tracing::info!(server = %config.server.name, "Starting tickr MCP server");
            commands::serve(config, fixtures.as_deref().map(Path::new)).await
        }
        MarketCommand::Price { ticker } => commands::cmd_price(config, &ticker).await,
        MarketCommand::Info { ticker } => commands::cmd_info(config, &ticker).await,
        MarketCommand::Tickers { sector } => {
            commands::cmd_tickers(config, sector.as_deref()).await
        }
    }
}
