//! Log subscriber setup.
//!
//! Logs always go to stderr; stdout carries the MCP protocol and command
//! output.

use tracing_subscriber::EnvFilter;

/// Filter directives for the subscriber.
///
/// A non-blank `RUST_LOG` wins, then `-v` (debug) or `-vv` (trace), then the
/// configured `logging.level`.
pub fn filter_directives(verbose: u8, configured: &str, rust_log: Option<&str>) -> String {
    if let Some(env) = rust_log.filter(|v| !v.trim().is_empty()) {
        return env.to_string();
    }
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global stderr subscriber.
pub fn init_logging(verbose: u8, configured: &str) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = filter_directives(verbose, configured, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid log filter '{directives}': {e}");
        EnvFilter::new(filter_directives(verbose, "info", None))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
