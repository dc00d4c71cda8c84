//! Command-line argument definitions.

use clap::{ArgAction, Parser, Subcommand};

/// tickr - stock market data for AI agents
#[derive(Parser, Debug)]
#[command(name = "tickr", version)]
#[command(about = "Yahoo Finance market data over the Model Context Protocol", long_about = None)]
pub struct Args {
    /// Configuration file path (falls back to $TICKR_CONFIG)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(flatten)]
    Market(MarketCommand),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Commands that need a loaded configuration and a market data provider.
#[derive(Subcommand, Debug)]
pub enum MarketCommand {
    /// Run the MCP server on stdin/stdout
    Serve {
        /// Serve quotes from a JSON fixture file instead of Yahoo Finance
        #[arg(long)]
        fixtures: Option<String>,
    },

    /// Print the latest closing price of a stock
    Price {
        /// Stock symbol, e.g. AAPL
        ticker: String,
    },

    /// Print a company profile
    Info {
        /// Stock symbol, e.g. AAPL
        ticker: String,
    },

    /// List popular tickers
    Tickers {
        /// Only list one sector
        #[arg(short, long)]
        sector: Option<String>,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Get a value by dotted key (e.g. provider.timeout_secs)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config directory)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker run
        #[arg(long)]
        docker_env: bool,
    },
}
