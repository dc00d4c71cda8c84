//! MCP server.
//!
//! [`TickrMcpServer`] implements rmcp's [`ServerHandler`] by delegating tool
//! listing and dispatch to a [`ToolRegistry`].

use std::sync::Arc;
use std::time::Instant;

use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorData, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::registry::ToolRegistry;

/// Server metadata reported during the MCP handshake.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
    /// Usage hints for clients.
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "tickr".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }
}

/// MCP server over a tool registry.
pub struct TickrMcpServer<R: ToolRegistry> {
    registry: Arc<R>,
    config: ServerConfig,
}

impl<R: ToolRegistry> Clone for TickrMcpServer<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
        }
    }
}

impl<R: ToolRegistry + 'static> TickrMcpServer<R> {
    /// Create a server with default metadata.
    pub fn new(registry: R) -> Self {
        Self {
            registry: Arc::new(registry),
            config: ServerConfig::default(),
        }
    }

    /// Set the server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    /// Set the server version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Set client instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.config.instructions = Some(instructions.into());
        self
    }

    /// Server metadata.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The underlying registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Dispatch a tool call by name.
    ///
    /// Unknown tools are rejected with `invalid_params`.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        let args = Value::Object(arguments.unwrap_or_default());
        let start = Instant::now();

        let Some(future) = self.registry.call(name, args) else {
            log::warn!("Call to unknown tool '{name}'");
            return Err(ErrorData::invalid_params(
                format!("Unknown tool: {name}"),
                None,
            ));
        };

        let result = future.await;
        match &result {
            Ok(r) if r.is_error == Some(true) => {
                log::info!("Tool '{name}' returned an error in {:?}", start.elapsed());
            }
            Ok(_) => log::info!("Tool '{name}' completed in {:?}", start.elapsed()),
            Err(e) => log::warn!("Tool '{name}' rejected: {}", e.message),
        }
        result
    }

    /// Serve MCP over stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        log::info!(
            "Starting MCP server '{}' v{} on stdio ({} tools)",
            self.config.name,
            self.config.version,
            self.registry.tool_count()
        );

        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        log::info!("MCP server stopped: {reason:?}");
        Ok(())
    }
}

impl<R: ToolRegistry + 'static> ServerHandler for TickrMcpServer<R> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = self.config.name.clone();
        info.server_info.version = self.config.version.clone();
        info.instructions = self.config.instructions.clone();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, ErrorData> {
        self.dispatch(&request.name, request.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::CompositeRegistry;
    use crate::tools::HealthTools;
    use rmcp::model::ErrorCode;
    use serde_json::json;

    fn server() -> TickrMcpServer<CompositeRegistry> {
        let registry = CompositeRegistry::new().add(HealthTools::new("test", "0.0.1", "fixture", 1));
        TickrMcpServer::new(registry)
            .with_name("Yahoo Finance API")
            .with_version("9.9.9")
            .with_instructions("Use the tools.")
    }

    #[test]
    fn test_get_info() {
        let info = server().get_info();
        assert_eq!(info.server_info.name, "Yahoo Finance API");
        assert_eq!(info.server_info.version, "9.9.9");
        assert_eq!(info.instructions.as_deref(), Some("Use the tools."));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_default_config() {
        let server = TickrMcpServer::new(CompositeRegistry::new());
        assert_eq!(server.config().name, "tickr");
        assert!(server.config().instructions.is_none());
        assert_eq!(server.registry().tool_count(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_known_tool() {
        let result = server().dispatch("health", None).await.unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let err = server().dispatch("get_history", None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("get_history"));
    }

    #[tokio::test]
    async fn test_dispatch_passes_arguments() {
        let args = json!({"ignored": true}).as_object().cloned();
        let result = server().dispatch("health", args).await.unwrap();
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_clone_shares_registry() {
        let a = server();
        let b = a.clone();
        assert!(std::ptr::eq(a.registry(), b.registry()));
    }
}
