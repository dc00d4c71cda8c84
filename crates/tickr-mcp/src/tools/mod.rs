//! MCP tools.
//!
//! - [`finance`]: price, company profile and ticker catalog lookups
//! - [`health`]: server status

pub mod finance;
pub mod health;

pub use finance::{FinanceTools, ListTickersArgs, SectorFilter, TickerArgs};
pub use health::{HealthResponse, HealthTools};

use rmcp::model::{CallToolResult, Content, ErrorData, Tool};
use serde_json::Value;
use std::sync::Arc;

/// Build a tool definition from a JSON schema value.
pub fn make_tool(name: &str, description: &str, schema: Value) -> Tool {
    let schema = match schema {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    Tool::new(name.to_string(), description.to_string(), Arc::new(schema))
}

/// Serialize a response as pretty JSON text content.
pub fn serialize_response<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Decode tool arguments, treating `null` as an empty object.
pub fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, ErrorData> {
    let args = match args {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ErrorData::invalid_params(e.to_string(), None))
}
