//! Configuration for tickr.
//!
//! Config files are TOML. The file is located, in order, from an explicit
//! path, the `TICKR_CONFIG` environment variable, or
//! `<platform config dir>/tickr/config.toml`. A missing file is not an
//! error: defaults are used.
//!
//! ```toml
//! [server]
//! name = "Yahoo Finance API"
//!
//! [provider]
//! kind = "yahoo"
//! timeout_secs = 10
//! max_retries = 2
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// ConfigManager
// ============================================================================

/// Behaviour shared by loadable, exportable config types.
///
/// The CLI `config` subcommands are written against this trait.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for directory and env-var naming.
    fn project_name() -> &'static str;

    /// Default location of the config file for this platform.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config path: explicit, then `<PREFIX>_CONFIG`, then default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        let from_env = std::env::var(Self::config_env_var()).ok();
        Self::resolve_config_path_with(explicit, from_env.as_deref())
    }

    /// Resolution with the environment value supplied by the caller.
    ///
    /// A blank environment value counts as unset.
    fn resolve_config_path_with(
        explicit: Option<&str>,
        from_env: Option<&str>,
    ) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = from_env.filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Environment variable naming the config file, e.g. `TICKR_CONFIG`.
    fn config_env_var() -> String {
        format!("{}_CONFIG", Self::env_prefix())
    }

    /// Upper-cased prefix for exported environment variables.
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace(['-', ' '], "_")
    }

    /// Load config from the resolved path, falling back to defaults.
    fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => Self::from_path(&path),
            Some(path) => {
                if explicit.is_some() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a TOML file.
    fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten into `PREFIX_SECTION_KEY=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&Self::env_prefix(), &value, &mut vars);
        Ok(vars)
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace('-', "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        toml::Value::Array(items) => {
            let joined = items
                .iter()
                .map(|v| match v {
                    toml::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(",");
            out.push((prefix.to_string(), joined));
        }
        other => out.push((prefix.to_string(), other.to_string())),
    }
}

// ============================================================================
// TickrConfig
// ============================================================================

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickrConfig {
    /// MCP server metadata.
    pub server: ServerSection,
    /// Market data provider settings.
    pub provider: ProviderConfig,
    /// Logging settings.
    pub logging: LoggingSection,
}

impl ConfigManager for TickrConfig {
    fn project_name() -> &'static str {
        "tickr"
    }
}

/// MCP server metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Name reported in the MCP handshake.
    pub name: String,
    /// Usage hints sent to clients.
    pub instructions: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: "Yahoo Finance API".to_string(),
            instructions: "Stock market lookups. Use list_popular_tickers to discover \
                           symbols, get_current_price for the latest close, and \
                           get_company_info for a company profile."
                .to_string(),
        }
    }
}

/// Which market data backend to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Yahoo Finance over HTTP.
    #[default]
    Yahoo,
    /// Offline JSON fixtures.
    Fixture,
}

/// Market data provider settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Backend selection.
    pub kind: ProviderKind,
    /// Base URL of the quote API.
    pub base_url: String,
    /// URL visited to obtain session cookies before fetching a crumb.
    pub cookie_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Retries after the first attempt for transient failures.
    pub max_retries: usize,
    /// Initial backoff delay in milliseconds.
    pub retry_delay_ms: u64,
    /// User-Agent header.
    pub user_agent: String,
    /// Fixture file for the `fixture` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixtures: Option<PathBuf>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            cookie_url: "https://fc.yahoo.com".to_string(),
            timeout_secs: 10,
            max_retries: 2,
            retry_delay_ms: 250,
            user_agent: concat!(
                "Mozilla/5.0 (X11; Linux x86_64) tickr/",
                env!("CARGO_PKG_VERSION")
            )
            .to_string(),
            fixtures: None,
        }
    }
}

/// Logging settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TickrConfig::default();
        assert_eq!(config.server.name, "Yahoo Finance API");
        assert_eq!(config.provider.kind, ProviderKind::Yahoo);
        assert_eq!(config.provider.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: TickrConfig = toml::from_str(
            r#"
            [provider]
            kind = "fixture"
            fixtures = "/data/quotes.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Fixture);
        assert_eq!(
            config.provider.fixtures,
            Some(PathBuf::from("/data/quotes.json"))
        );
        assert_eq!(config.provider.max_retries, 2);
        assert_eq!(config.server, ServerSection::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = TickrConfig::default();
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[server]"));
        assert!(text.contains("[provider]"));
        let parsed: TickrConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = TickrConfig::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_explicit_missing_is_error() {
        let err = TickrConfig::load(Some("/nonexistent/tickr.toml")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_malformed() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[provider\nkind = ").unwrap();
        let err = TickrConfig::load(Some(path.to_str().unwrap())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn test_resolve_explicit_wins() {
        let path = TickrConfig::resolve_config_path(Some("/explicit/config.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/explicit/config.toml"));
    }

    #[test]
    fn test_resolve_env_used_without_explicit() {
        let path = TickrConfig::resolve_config_path_with(None, Some("/env/tickr.toml")).unwrap();
        assert_eq!(path, PathBuf::from("/env/tickr.toml"));

        let path = TickrConfig::resolve_config_path_with(
            Some("/explicit/config.toml"),
            Some("/env/tickr.toml"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/explicit/config.toml"));
    }

    #[test]
    fn test_resolve_blank_env_falls_through() {
        assert_eq!(
            TickrConfig::resolve_config_path_with(None, Some("  ")),
            TickrConfig::default_config_path()
        );
        assert_eq!(
            TickrConfig::resolve_config_path_with(None, None),
            TickrConfig::default_config_path()
        );
        assert_eq!(TickrConfig::config_env_var(), "TICKR_CONFIG");
    }

    #[test]
    fn test_env_vars() {
        let vars = TickrConfig::default().to_env_vars().unwrap();
        let get = |k: &str| vars.iter().find(|(key, _)| key == k).map(|(_, v)| v.clone());
        assert_eq!(get("TICKR_SERVER_NAME").as_deref(), Some("Yahoo Finance API"));
        assert_eq!(get("TICKR_PROVIDER_KIND").as_deref(), Some("yahoo"));
        assert_eq!(get("TICKR_PROVIDER_TIMEOUT_SECS").as_deref(), Some("10"));
        assert!(get("TICKR_PROVIDER_FIXTURES").is_none());
    }
}
