//! Tool registry trait for the MCP server.
//!
//! A [`ToolRegistry`] lists tool definitions and dispatches calls by name.
//! [`CompositeRegistry`] stacks several registries (finance tools, health)
//! behind one, which is what [`TickrMcpServer`](crate::TickrMcpServer) holds.

use rmcp::model::{CallToolResult, ErrorData, Tool};
use serde_json::Value;
use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use crate::error::{Error, Result};

/// Type alias for async tool handler results.
pub type ToolResult =
    Pin<Box<dyn Future<Output = std::result::Result<CallToolResult, ErrorData>> + Send>>;

/// Registration and dispatch of MCP tools.
///
/// `call` returns `None` for names the registry does not own, which lets a
/// composite try each of its members in turn.
pub trait ToolRegistry: Send + Sync {
    /// Definitions of every tool this registry owns.
    fn tools(&self) -> Vec<Tool>;

    /// Dispatch a call, or `None` if the name is not ours.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Number of tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Whether a tool with this name exists.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }

    /// Tool names, in listing order.
    fn tool_names(&self) -> Vec<String> {
        self.tools().iter().map(|t| t.name.to_string()).collect()
    }
}

/// A registry made of sub-registries.
///
/// Calls go to the first member that recognizes the name.
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    /// Create an empty composite.
    pub fn new() -> Self {
        Self {
            registries: Vec::new(),
        }
    }

    /// Add a sub-registry.
    ///
    /// Name collisions are not checked; the earlier registry wins dispatch.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }

    /// Add a sub-registry, rejecting tool names already present.
    pub fn try_add<R: ToolRegistry + 'static>(self, registry: R) -> Result<Self> {
        let existing: HashSet<String> = self.tool_names().into_iter().collect();
        if let Some(dup) = registry
            .tool_names()
            .into_iter()
            .find(|n| existing.contains(n))
        {
            return Err(Error::DuplicateTool(dup));
        }
        Ok(self.add(registry))
    }

    /// Number of sub-registries.
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Whether no sub-registries were added.
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

impl Default for CompositeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<Tool> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        self.registries
            .iter()
            .find(|r| r.has_tool(name))
            .and_then(|r| r.call(name, args))
    }
}

// ============================================================================
// Tests
// ============================================================================
