//! Health check tool.
//!
//! Reports server status, which market data provider is active, and how
//! many tools the server exposes.

use crate::registry::{ToolRegistry, ToolResult};
use crate::tools::{make_tool, serialize_response};
use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Health check response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    /// Server name.
    pub server_name: String,
    /// Server version.
    pub version: String,
    /// Market data provider name.
    pub provider: String,
    /// Number of registered tools, including `health`.
    pub tool_count: usize,
}

/// Registry providing the `health` tool.
pub struct HealthTools {
    response: HealthResponse,
}

impl HealthTools {
    /// Create health tools.
    ///
    /// `total_tool_count` should include the health tool itself.
    pub fn new(
        server_name: impl Into<String>,
        version: impl Into<String>,
        provider: impl Into<String>,
        total_tool_count: usize,
    ) -> Self {
        Self {
            response: HealthResponse {
                status: "healthy".to_string(),
                server_name: server_name.into(),
                version: version.into(),
                provider: provider.into(),
                tool_count: total_tool_count,
            },
        }
    }
}

impl ToolRegistry for HealthTools {
    fn tools(&self) -> Vec<Tool> {
        vec![make_tool(
            "health",
            "Check server health and status",
            json!({ "type": "object", "properties": {} }),
        )]
    }

    fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
        if name != "health" {
            return None;
        }
        let response = self.response.clone();
        Some(Box::pin(async move { serialize_response(&response) }))
    }
}
