//! Command implementations.
//!
//! `price`, `info` and `tickers` go through the same [`TickrMcpServer`]
//! dispatch path as MCP clients, so the shell sees exactly the JSON an agent
//! would.

use std::path::Path;
use std::sync::Arc;

use serde_json::{Value, json};
use tickr_core::{FixtureMarketData, MarketData, ProviderConfig, ProviderKind, TickrConfig};
use tickr_mcp::model::RawContent;
use tickr_mcp::{CompositeRegistry, TickrMcpServer, finance_registry};
use tickr_yahoo::YahooClient;

use crate::error::{Error, Result};

/// Server type used by every command.
pub type Server = TickrMcpServer<CompositeRegistry>;

/// Build the market data provider.
///
/// `fixtures` overrides the configured provider.
pub fn build_market(
    config: &ProviderConfig,
    fixtures: Option<&Path>,
) -> Result<Arc<dyn MarketData>> {
    if let Some(path) = fixtures {
        log::info!("Using fixture data from {}", path.display());
        return Ok(Arc::new(FixtureMarketData::from_file(path)?));
    }

    match config.kind {
        ProviderKind::Yahoo => {
            log::info!("Using Yahoo Finance at {}", config.base_url);
            Ok(Arc::new(YahooClient::new(config)?))
        }
        ProviderKind::Fixture => {
            let path = config.fixtures.as_deref().ok_or_else(|| {
                tickr_core::Error::config(
                    "provider.fixtures must be set when provider.kind is \"fixture\"",
                )
            })?;
            log::info!("Using fixture data from {}", path.display());
            Ok(Arc::new(FixtureMarketData::from_file(path)?))
        }
    }
}

/// Build the MCP server over a provider.
pub fn build_server(config: &TickrConfig, market: Arc<dyn MarketData>) -> Server {
    let version = env!("CARGO_PKG_VERSION");
    let registry = finance_registry(market, &config.server.name, version);
    let server = TickrMcpServer::new(registry)
        .with_name(config.server.name.clone())
        .with_version(version);

    if config.server.instructions.trim().is_empty() {
        server
    } else {
        server.with_instructions(config.server.instructions.clone())
    }
}

/// Run the MCP server on stdio until the client disconnects.
pub async fn serve(config: &TickrConfig, fixtures: Option<&Path>) -> Result<()> {
    let market = build_market(&config.provider, fixtures)?;
    build_server(config, market).serve_stdio().await?;
    Ok(())
}

/// Call a tool and return its text output.
///
/// Tool-level failures become [`Error::Tool`] carrying the tool's JSON body.
pub async fn run_tool(server: &Server, name: &str, args: Value) -> Result<String> {
    let result = server
        .dispatch(name, args.as_object().cloned())
        .await
        .map_err(|e| Error::Rejected(e.message.to_string()))?;

    let text = result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if result.is_error == Some(true) {
        Err(Error::Tool(text))
    } else {
        Ok(text)
    }
}

/// `tickr price <TICKER>`
pub async fn cmd_price(config: &TickrConfig, ticker: &str) -> Result<()> {
    let server = build_server(config, build_market(&config.provider, None)?);
    println!(
        "{}",
        run_tool(&server, "get_current_price", json!({ "ticker": ticker })).await?
    );
    Ok(())
}

/// `tickr info <TICKER>`
pub async fn cmd_info(config: &TickrConfig, ticker: &str) -> Result<()> {
    let server = build_server(config, build_market(&config.provider, None)?);
    println!(
        "{}",
        run_tool(&server, "get_company_info", json!({ "ticker": ticker })).await?
    );
    Ok(())
}

/// `tickr tickers [--sector S]`
pub async fn cmd_tickers(config: &TickrConfig, sector: Option<&str>) -> Result<()> {
    let server = build_server(config, build_market(&config.provider, None)?);
    println!(
        "{}",
        run_tool(&server, "list_popular_tickers", tickers_args(sector)).await?
    );
    Ok(())
}

fn tickers_args(sector: Option<&str>) -> Value {
    match sector {
        Some(s) => json!({ "filter": { "sector": s } }),
        None => json!({}),
    }
}
