//! Error types for tickr-core.

use std::path::{Path, PathBuf};

/// Result type alias for tickr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving market data.
///
/// Marked `#[non_exhaustive]` so providers can grow new failure modes
/// without breaking downstream matches.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// I/O error, optionally tied to a path.
    #[error("I/O error{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    Io {
        /// Underlying error.
        #[source]
        source: std::io::Error,
        /// Path being read or written, if known.
        path: Option<PathBuf>,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic.
        message: String,
    },

    /// A ticker symbol failed validation.
    #[error("Invalid ticker symbol '{symbol}': {reason}")]
    InvalidSymbol {
        /// The rejected input.
        symbol: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The requested sector is not in the catalog.
    #[error("Sector '{sector}' not found")]
    UnknownSector {
        /// The requested sector.
        sector: String,
        /// Sector names the catalog does know, in catalog order.
        available: Vec<String>,
    },

    /// The provider returned no rows for the symbol.
    #[error("No data available")]
    NoData {
        /// Symbol that was looked up.
        symbol: String,
    },

    /// Upstream provider failure (bad payload, provider-reported error).
    #[error("Provider error: {message}")]
    Provider {
        /// Human-readable message.
        message: String,
        /// Source error if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Non-success HTTP status from the provider.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Response status code.
        status: u16,
        /// Request URL.
        url: String,
    },
}

impl Error {
    /// Returns whether retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Io { .. } => true,
            Error::Provider { source, .. } => source.is_some(),
            Error::Http { status, .. } => *status == 429 || *status >= 500,
            Error::Json(_)
            | Error::Toml(_)
            | Error::Config { .. }
            | Error::InvalidSymbol { .. }
            | Error::UnknownSector { .. }
            | Error::NoData { .. } => false,
        }
    }

    /// Returns `true` if the failure was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Error::InvalidSymbol { .. } | Error::UnknownSector { .. }
        )
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a provider error with no underlying source.
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Error::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a provider error wrapping a transport-level source.
    pub fn provider_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Provider {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an I/O error tied to a path.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            source,
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Creates a no-data error for a symbol.
    pub fn no_data(symbol: impl Into<String>) -> Self {
        Error::NoData {
            symbol: symbol.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source, path: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_message() {
        let err = Error::no_data("ZZZZ");
        assert_eq!(err.to_string(), "No data available");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unknown_sector_message() {
        let err = Error::UnknownSector {
            sector: "Crypto".to_string(),
            available: vec!["Technology".to_string()],
        };
        assert_eq!(err.to_string(), "Sector 'Crypto' not found");
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_http_retryable() {
        let url = "https://example.test".to_string();
        assert!(Error::Http { status: 503, url: url.clone() }.is_retryable());
        assert!(Error::Http { status: 429, url: url.clone() }.is_retryable());
        assert!(!Error::Http { status: 404, url }.is_retryable());
    }

    #[test]
    fn test_provider_retryable_only_with_source() {
        assert!(!Error::provider("bad payload").is_retryable());
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout");
        assert!(Error::provider_with_source("request failed", io).is_retryable());
    }

    #[test]
    fn test_io_with_path_display() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io_with_path(io, "/tmp/x.toml");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/x.toml"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");
        assert!(!err.is_invalid_input());
    }
}
