//! Error types for tickr-mcp, and conversion of tickr errors into MCP
//! responses.
//!
//! Two kinds of failure reach an MCP client:
//!
//! - Protocol errors ([`ErrorData`]) for requests the server cannot accept,
//!   such as a malformed ticker or missing argument.
//! - Tool errors ([`CallToolResult`] with `is_error = true`) for lookups that
//!   ran but failed, such as a symbol with no data. The text payload is JSON
//!   of the form `{"error": "..."}` so agents can read it like any result.

use rmcp::model::{CallToolResult, Content, ErrorData};
use serde_json::json;
use thiserror::Error;

/// Result type alias for tickr-mcp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the MCP server.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tickr-core.
    #[error("Core error: {0}")]
    Core(#[from] tickr_core::Error),

    /// Transport setup or shutdown failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Two registries exposed the same tool name.
    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),
}

/// Conversion from [`tickr_core::Error`] into MCP protocol errors.
pub trait McpErrorExt {
    /// Map to an rmcp [`ErrorData`].
    fn to_mcp_error(&self) -> ErrorData;
}

impl McpErrorExt for tickr_core::Error {
    fn to_mcp_error(&self) -> ErrorData {
        match self {
            tickr_core::Error::InvalidSymbol { .. }
            | tickr_core::Error::UnknownSector { .. }
            | tickr_core::Error::Json(_) => ErrorData::invalid_params(self.to_string(), None),
            _ => ErrorData::internal_error(self.to_string(), None),
        }
    }
}

/// Render a failed lookup as a tool error result.
///
/// Unknown sectors also list the sectors that do exist.
pub fn tool_failure(err: &tickr_core::Error) -> CallToolResult {
    let mut body = json!({ "error": err.to_string() });
    if let tickr_core::Error::UnknownSector { available, .. } = err {
        body["available_sectors"] = json!(available);
    }
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    CallToolResult::error(vec![Content::text(text)])
}
