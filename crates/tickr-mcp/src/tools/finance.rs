//! Market-data MCP tools.
//!
//! `FinanceTools` implements [`ToolRegistry`] by delegating to a
//! [`MarketData`] provider and the popular-ticker [`Catalog`]:
//!
//! - `get_current_price`: latest closing price of a stock
//! - `get_company_info`: company profile
//! - `list_popular_tickers`: popular tickers, optionally by sector

use std::sync::Arc;
use std::time::Instant;

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde::Deserialize;
use serde_json::{Value, json};
use tickr_core::{Catalog, MarketData, Symbol};

use crate::error::{McpErrorExt, tool_failure};
use crate::registry::{ToolRegistry, ToolResult};
use crate::tools::{make_tool, parse_args, serialize_response};

// ---------------------------------------------------------------------------
// Argument types
// ---------------------------------------------------------------------------

/// Arguments for `get_current_price` and `get_company_info`.
#[derive(Debug, Deserialize)]
pub struct TickerArgs {
    /// Stock symbol, e.g. AAPL.
    pub ticker: String,
}

impl TickerArgs {
    fn symbol(&self) -> Result<Symbol, ErrorData> {
        Symbol::parse(&self.ticker).map_err(|e| e.to_mcp_error())
    }
}

/// Optional sector filter.
#[derive(Debug, Default, Deserialize)]
pub struct SectorFilter {
    /// Sector name (Technology, Consumer, Financial, Healthcare, Energy).
    #[serde(default)]
    pub sector: Option<String>,
}

/// Arguments for `list_popular_tickers`.
///
/// The sector may be given as `{"filter": {"sector": ...}}` or directly as
/// `{"sector": ...}`; the nested form wins when both are present.
#[derive(Debug, Default, Deserialize)]
pub struct ListTickersArgs {
    /// Nested filter object.
    #[serde(default)]
    pub filter: Option<SectorFilter>,
    /// Top-level shorthand.
    #[serde(default)]
    pub sector: Option<String>,
}

impl ListTickersArgs {
    /// Effective sector filter.
    pub fn sector(&self) -> Option<&str> {
        self.filter
            .as_ref()
            .and_then(|f| f.sector.as_deref())
            .or(self.sector.as_deref())
    }
}

// ---------------------------------------------------------------------------
// FinanceTools
// ---------------------------------------------------------------------------

/// MCP tools for stock lookups.
pub struct FinanceTools {
    market: Arc<dyn MarketData>,
    catalog: Arc<Catalog>,
}

impl FinanceTools {
    /// Create finance tools over a provider, using the popular catalog.
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self {
            market,
            catalog: Arc::new(Catalog::popular()),
        }
    }

    /// Replace the ticker catalog.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Arc::new(catalog);
        self
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.market.name()
    }
}

fn ticker_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ticker": {
                "type": "string",
                "description": "Stock symbol (e.g., AAPL, MSFT)"
            }
        },
        "required": ["ticker"]
    })
}

async fn current_price(
    market: Arc<dyn MarketData>,
    args: Value,
) -> Result<CallToolResult, ErrorData> {
    let symbol = parse_args::<TickerArgs>(args)?.symbol()?;
    log::info!("Fetching current price for {symbol}");
    let start = Instant::now();

    match market.current_price(&symbol).await {
        Ok(quote) => {
            log::debug!("Price for {symbol} in {:?}", start.elapsed());
            serialize_response(&quote)
        }
        Err(e) => {
            log::warn!("Price lookup for {symbol} failed: {e}");
            Ok(tool_failure(&e))
        }
    }
}

async fn company_info(
    market: Arc<dyn MarketData>,
    args: Value,
) -> Result<CallToolResult, ErrorData> {
    let symbol = parse_args::<TickerArgs>(args)?.symbol()?;
    log::info!("Fetching company information for {symbol}");
    let start = Instant::now();

    match market.company_profile(&symbol).await {
        Ok(profile) => {
            log::debug!("Profile for {symbol} in {:?}", start.elapsed());
            serialize_response(&profile)
        }
        Err(e) => {
            log::warn!("Profile lookup for {symbol} failed: {e}");
            Ok(tool_failure(&e))
        }
    }
}

fn popular_tickers(catalog: &Catalog, args: Value) -> Result<CallToolResult, ErrorData> {
    let args: ListTickersArgs = parse_args(args)?;
    match catalog.list(args.sector()) {
        Ok(listing) => serialize_response(&listing),
        Err(e) => Ok(tool_failure(&e)),
    }
}

impl ToolRegistry for FinanceTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool(
                "get_current_price",
                "Fetch the current (latest closing) price of a stock.",
                ticker_schema(),
            ),
            make_tool(
                "get_company_info",
                "Get detailed company information: name, sector, industry, \
                 website, market cap, forward P/E, dividend yield, trailing EPS \
                 and business description.",
                ticker_schema(),
            ),
            make_tool(
                "list_popular_tickers",
                "List popular stock tickers, optionally filtered by sector \
                 (Technology, Consumer, Financial, Healthcare, Energy).",
                json!({
                    "type": "object",
                    "properties": {
                        "filter": {
                            "type": "object",
                            "properties": {
                                "sector": {
                                    "type": "string",
                                    "description": "Sector name",
                                    "enum": tickr_core::Sector::names()
                                }
                            }
                        }
                    }
                }),
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        match name {
            "get_current_price" => Some(Box::pin(current_price(Arc::clone(&self.market), args))),
            "get_company_info" => Some(Box::pin(company_info(Arc::clone(&self.market), args))),
            "list_popular_tickers" => {
                let catalog = Arc::clone(&self.catalog);
                Some(Box::pin(async move { popular_tickers(&catalog, args) }))
            }
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{ErrorCode, RawContent};
    use tickr_core::{FixtureMarketData, ProfileFields};

    fn sym(s: &str) -> Symbol {
        Symbol::parse(s).unwrap()
    }

    fn tools() -> FinanceTools {
        let market = FixtureMarketData::new()
            .with_quote(sym("AAPL"), 189.987, Some("USD"))
            .with_profile(
                sym("AAPL"),
                ProfileFields {
                    name: Some("Apple Inc.".to_string()),
                    sector: Some("Technology".to_string()),
                    ..Default::default()
                },
            );
        FinanceTools::new(Arc::new(market))
    }

    fn body(result: &CallToolResult) -> Value {
        let text = match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            _ => panic!("Expected text content"),
        };
        serde_json::from_str(&text).unwrap()
    }

    async fn call(tools: &FinanceTools, name: &str, args: Value) -> CallToolResult {
        tools.call(name, args).unwrap().await.unwrap()
    }

    #[test]
    fn test_tool_names() {
        let tools = tools();
        assert_eq!(
            tools.tool_names(),
            vec!["get_current_price", "get_company_info", "list_popular_tickers"]
        );
        assert_eq!(tools.provider_name(), "fixture");
        assert!(tools.call("get_history", json!({})).is_none());
    }

    #[test]
    fn test_schemas_require_ticker() {
        let listed = tools().tools();
        assert_eq!(listed[0].input_schema["required"], json!(["ticker"]));
        assert_eq!(listed[1].input_schema["required"], json!(["ticker"]));
        assert!(listed[2].input_schema.get("required").is_none());
    }

    #[tokio::test]
    async fn test_get_current_price() {
        let result = call(&tools(), "get_current_price", json!({"ticker": "aapl"})).await;
        assert_eq!(result.is_error, Some(false));
        let body = body(&result);
        assert_eq!(body["symbol"], "AAPL");
        assert_eq!(body["price"], 189.99);
        assert_eq!(body["currency"], "USD");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_get_current_price_no_data() {
        let result = call(&tools(), "get_current_price", json!({"ticker": "ZZZZ"})).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(body(&result), json!({"error": "No data available"}));
    }

    #[tokio::test]
    async fn test_get_current_price_missing_ticker() {
        let err = tools()
            .call("get_current_price", json!({}))
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_get_current_price_invalid_ticker() {
        let err = tools()
            .call("get_current_price", json!({"ticker": "DROP TABLE"}))
            .unwrap()
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_get_company_info() {
        let result = call(&tools(), "get_company_info", json!({"ticker": "AAPL"})).await;
        let body = body(&result);
        assert_eq!(body["name"], "Apple Inc.");
        assert_eq!(body["sector"], "Technology");
        assert_eq!(body["industry"], "Unknown");
        assert_eq!(body["description"], "No description available");
        assert!(body["marketCap"].is_null());
    }

    #[tokio::test]
    async fn test_list_popular_tickers_all() {
        let result = call(&tools(), "list_popular_tickers", json!({})).await;
        let body = body(&result);
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 5);
        assert_eq!(body["Financial"][4], json!({"symbol": "BRK-B", "uri": "/tickers/BRK-B"}));
    }

    #[tokio::test]
    async fn test_list_popular_tickers_null_args() {
        let result = call(&tools(), "list_popular_tickers", Value::Null).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(body(&result).as_object().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_list_popular_tickers_nested_filter() {
        let result = call(
            &tools(),
            "list_popular_tickers",
            json!({"filter": {"sector": "Healthcare"}}),
        )
        .await;
        let body = body(&result);
        assert_eq!(body["sector"], "Healthcare");
        assert_eq!(body["tickers"][0]["symbol"], "JNJ");
    }

    #[tokio::test]
    async fn test_list_popular_tickers_top_level_sector() {
        let result = call(&tools(), "list_popular_tickers", json!({"sector": "energy"})).await;
        assert_eq!(body(&result)["sector"], "Energy");
    }

    #[tokio::test]
    async fn test_list_popular_tickers_unknown_sector() {
        let result = call(
            &tools(),
            "list_popular_tickers",
            json!({"filter": {"sector": "Crypto"}}),
        )
        .await;
        assert_eq!(result.is_error, Some(true));
        let body = body(&result);
        assert_eq!(body["error"], "Sector 'Crypto' not found");
        assert_eq!(
            body["available_sectors"],
            json!(["Technology", "Consumer", "Financial", "Healthcare", "Energy"])
        );
    }

    #[test]
    fn test_list_args_precedence() {
        let args: ListTickersArgs =
            serde_json::from_value(json!({"filter": {"sector": "Energy"}, "sector": "Consumer"}))
                .unwrap();
        assert_eq!(args.sector(), Some("Energy"));
        let args: ListTickersArgs = serde_json::from_value(json!({"filter": {}})).unwrap();
        assert_eq!(args.sector(), None);
    }
}
