//! Error types for tickr-cli

use thiserror::Error;

/// Result type alias for tickr-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tickr-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from tickr-core (config, fixtures, provider setup)
    #[error(transparent)]
    Core(#[from] tickr_core::Error),

    /// Error from the MCP server
    #[error(transparent)]
    Mcp(#[from] tickr_mcp::Error),

    /// A tool ran but reported a failure
    #[error("{0}")]
    Tool(String),

    /// A tool call was rejected before running
    #[error("Invalid request: {0}")]
    Rejected(String),
}
