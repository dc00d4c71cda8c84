//! MCP server exposing tickr market-data tools to AI agents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       tickr-mcp                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ToolRegistry trait:  tool registration and dispatch        │
//! │  CompositeRegistry:  combine multiple tool sources          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TickrMcpServer:  rmcp ServerHandler over a registry        │
//! │  ServerConfig:  server metadata (name, version, hints)      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  McpErrorExt:  tickr_core::Error → rmcp::ErrorData          │
//! │  tool_failure:  lookup failures as {"error": ...} results   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Tools:                                                     │
//! │  ├── get_current_price / get_company_info                   │
//! │  ├── list_popular_tickers                                   │
//! │  └── health                                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tickr_mcp::{TickrMcpServer, finance_registry};
//!
//! let market = Arc::new(YahooClient::new(&config.provider)?);
//! let registry = finance_registry(market, "Yahoo Finance API", "0.1.0");
//!
//! TickrMcpServer::new(registry)
//!     .with_name("Yahoo Finance API")
//!     .serve_stdio()
//!     .await?;
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

use std::sync::Arc;

use tickr_core::MarketData;

/// Re-export of rmcp's protocol model types.
pub use rmcp::model;

// Re-exports: registry
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};

// Re-exports: server
pub use server::{ServerConfig, TickrMcpServer};

// Re-exports: error
pub use error::{Error, McpErrorExt, Result, tool_failure};

// Re-exports: tools
pub use tools::{FinanceTools, HealthResponse, HealthTools};

/// Registry with the finance tools plus `health`.
pub fn finance_registry(
    market: Arc<dyn MarketData>,
    server_name: &str,
    version: &str,
) -> CompositeRegistry {
    let finance = FinanceTools::new(market);
    let provider = finance.provider_name().to_string();
    let total = finance.tool_count() + 1;
    CompositeRegistry::new()
        .add(finance)
        .add(HealthTools::new(server_name, version, provider, total))
}
